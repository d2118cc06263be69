mod block;
mod frames;
mod handlers;
mod passes;
mod script;
mod templates;

pub use block::{Block, Line, LineKind};
pub use frames::{frame_name, MAIN_FRAME};
pub use script::{footer, header};
pub use templates::{Command, Dialect};

use crate::config::{Event, Options};
use frames::FrameRegistry;
use std::fmt;
use tracing::{debug, info};

/// Why an event produced no block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The action is not one the generator knows.
    UnknownAction,
    /// Key events only lower the tab key.
    NonTabKey,
    /// Change events only lower `<select>` controls.
    NonSelectChange,
    /// A field the command needs is missing.
    MissingField(&'static str),
    /// The screenshot counter cannot advance any further.
    ScreenshotCounterExhausted,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownAction => write!(f, "unknown action"),
            Self::NonTabKey => write!(f, "key is not tab"),
            Self::NonSelectChange => write!(f, "change outside a select"),
            Self::MissingField(field) => write!(f, "missing {}", field),
            Self::ScreenshotCounterExhausted => write!(f, "screenshot counter exhausted"),
        }
    }
}

/// An event the generator did not turn into a block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Skipped {
    /// Position of the event in the input.
    pub index: usize,
    pub action: String,
    pub reason: SkipReason,
}

/// Output of one generation call.
#[derive(Debug, Clone)]
pub struct Generated {
    /// The full script, header and footer included.
    pub script: String,
    /// Final blocks, after post-processing.
    pub blocks: Vec<Block>,
    /// Events that produced nothing, in input order.
    pub skipped: Vec<Skipped>,
}

impl Generated {
    /// Number of `frames.find(...)` declarations in the output.
    pub fn frame_declarations(&self) -> usize {
        self.blocks
            .iter()
            .flat_map(|b| b.lines())
            .filter(|l| l.kind == LineKind::FrameSet && l.text.contains("frames.find("))
            .count()
    }
}

/// Turns recorded events into an automation script.
///
/// A `Generator` holds only options; every call to [`Generator::generate`]
/// starts from a fresh generation context, so one generator can serve any
/// number of calls, from any number of threads.
#[derive(Debug, Clone, Default)]
pub struct Generator {
    options: Options,
}

impl Generator {
    pub fn new(options: Options) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Generate a script from events, in order.
    pub fn generate(&self, events: &[Event]) -> Generated {
        let mut ctx = GenerationContext::new(&self.options);

        for (index, event) in events.iter().enumerate() {
            ctx.frames.observe(event.frame_id, event.frame_url.as_deref());
            match ctx.handle(event) {
                Ok(Some(block)) => ctx.blocks.push(block),
                Ok(None) => {}
                Err(reason) => {
                    debug!("skipping event {} ({}): {}", index, event.action, reason);
                    ctx.skipped.push(Skipped {
                        index,
                        action: event.action.clone(),
                        reason,
                    });
                }
            }
        }

        let generated = ctx.finish();
        info!(
            "generated {} blocks from {} events ({} skipped)",
            generated.blocks.len(),
            events.len(),
            generated.skipped.len()
        );
        generated
    }
}

/// Mutable state for one generation call.
pub(crate) struct GenerationContext<'a> {
    pub(crate) options: &'a Options,
    pub(crate) dialect: &'static Dialect,
    pub(crate) frames: FrameRegistry,
    pub(crate) blocks: Vec<Block>,
    pub(crate) skipped: Vec<Skipped>,
    pub(crate) next_screenshot: u64,
    pub(crate) saw_navigation: bool,
}

impl<'a> GenerationContext<'a> {
    fn new(options: &'a Options) -> Self {
        Self {
            options,
            dialect: options.library.dialect(),
            frames: FrameRegistry::new(),
            blocks: Vec::new(),
            skipped: Vec::new(),
            next_screenshot: u64::from(options.screenshot_origin),
            saw_navigation: false,
        }
    }

    /// Run the post-processing passes and serialize.
    fn finish(mut self) -> Generated {
        if self.saw_navigation && self.options.wait_for_navigation {
            let line = Line::new(
                LineKind::NavigationPromise,
                self.dialect.render(Command::NavigationPromise, &[]),
            );
            self.blocks.insert(0, Block::with_lines(None, vec![line]));
        }

        passes::hoist_frame_declarations(&mut self.blocks, &mut self.frames, self.dialect);
        if self.options.blank_lines_between_blocks {
            passes::insert_blank_lines(&mut self.blocks);
        }

        let script = script::render(&self.blocks, self.options);
        Generated {
            script,
            blocks: self.blocks,
            skipped: self.skipped,
        }
    }
}
