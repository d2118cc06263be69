pub mod events;
pub mod options;
pub mod recording;

pub use events::{Event, EventKind, TAB_KEY_CODE};
pub use options::{Library, Options};
pub use recording::Recording;
