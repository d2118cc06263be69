//! # eoka-codegen
//!
//! Turn a recorded browser session into a runnable automation script.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use eoka_codegen::{Generator, Options, Recording};
//!
//! # fn main() -> eoka_codegen::Result<()> {
//! let recording = Recording::load("session.jsonl")?;
//! let generator = Generator::new(Options::load("codegen.yaml")?);
//! let generated = generator.generate(&recording.events);
//! println!("{}", generated.script);
//! # Ok(())
//! # }
//! ```

mod config;
mod generator;

pub use config::{Event, EventKind, Library, Options, Recording, TAB_KEY_CODE};
pub use generator::{
    footer, frame_name, header, Block, Command, Dialect, Generated, Generator, Line, LineKind,
    SkipReason, Skipped, MAIN_FRAME,
};

/// Result type for eoka-codegen operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading options or recordings.
///
/// Generation itself never fails; events it cannot lower are reported as
/// [`Skipped`] entries instead.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(String),

    #[error("yaml parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("json parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid event on line {line}: {source}")]
    Event {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Generate a script from events with the given options.
pub fn generate(events: &[Event], options: &Options) -> String {
    Generator::new(options.clone()).generate(events).script
}
