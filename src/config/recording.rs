use super::Event;
use crate::{Error, Result};
use std::path::Path;

/// An ordered list of recorded events, as handed over by the recorder.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Recording {
    pub events: Vec<Event>,
}

impl Recording {
    /// Load a recording from a file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::parse(&content)
    }

    /// Parse a recording from either a JSON array or JSON lines.
    pub fn parse(content: &str) -> Result<Self> {
        let trimmed = content.trim_start();
        if trimmed.starts_with('[') {
            let events: Vec<Event> = serde_json::from_str(trimmed)?;
            return Ok(Self { events });
        }

        let mut events = Vec::new();
        for (i, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let event = serde_json::from_str(line).map_err(|source| Error::Event {
                line: i + 1,
                source,
            })?;
            events.push(event);
        }
        Ok(Self { events })
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
