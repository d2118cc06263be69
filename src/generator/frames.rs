use std::collections::HashMap;
use tracing::warn;

/// Reference name of the main document in generated scripts.
pub const MAIN_FRAME: &str = "page";

/// Reference name for a sub-frame.
pub fn frame_name(id: u64) -> String {
    format!("frame{}", id)
}

/// The frame the event being handled runs against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentFrame {
    /// `None` for the main document.
    pub id: Option<u64>,
    /// Variable name to call commands on.
    pub name: String,
}

impl Default for CurrentFrame {
    fn default() -> Self {
        Self {
            id: None,
            name: MAIN_FRAME.to_string(),
        }
    }
}

/// Tracks the current frame and the sub-frames still waiting for a declaration.
#[derive(Debug, Default)]
pub struct FrameRegistry {
    current: CurrentFrame,
    pending: HashMap<u64, String>,
}

impl FrameRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Update the current frame from an event's frame fields.
    ///
    /// The URL of a frame is taken from its first occurrence that carries one.
    pub fn observe(&mut self, frame_id: Option<u64>, frame_url: Option<&str>) -> &CurrentFrame {
        match frame_id.filter(|&id| id != 0) {
            Some(id) => {
                if self.current.id != Some(id) {
                    self.current = CurrentFrame {
                        id: Some(id),
                        name: frame_name(id),
                    };
                }
                let url = self.pending.entry(id).or_default();
                if url.is_empty() {
                    if let Some(u) = frame_url {
                        *url = u.to_string();
                    }
                }
            }
            None => self.current = CurrentFrame::default(),
        }
        &self.current
    }

    pub fn current(&self) -> &CurrentFrame {
        &self.current
    }

    /// Whether a declaration is still owed for this frame.
    pub fn is_pending(&self, id: u64) -> bool {
        self.pending.contains_key(&id)
    }

    /// Remove a frame and return the URL to declare it with.
    pub fn take(&mut self, id: u64) -> Option<String> {
        let url = self.pending.remove(&id)?;
        if url.is_empty() {
            warn!("frame {} was never seen with a URL", id);
        }
        Some(url)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
