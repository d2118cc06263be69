use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Key code the recorder reports for the tab key.
pub const TAB_KEY_CODE: u32 = 9;

/// One recorded browser interaction.
///
/// Field names follow the recorder's JSON (`keyCode`, `frameId`, ...). Only
/// `action` is required; everything else depends on the kind of event.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Discriminant, e.g. `click` or `GOTO`.
    pub action: String,

    /// CSS selector of the element the event happened on.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selector: Option<String>,

    /// String for key/change events, an object for viewport and screenshot.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_code: Option<u32>,

    /// Upper-case DOM tag name, e.g. `SELECT`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag_name: Option<String>,

    /// Recorder-assigned sub-frame id. Absent or zero means the main document.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frame_id: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frame_url: Option<String>,
}

impl Event {
    /// Create an event with only an action set.
    pub fn new(action: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            ..Default::default()
        }
    }

    pub fn selector(mut self, selector: impl Into<String>) -> Self {
        self.selector = Some(selector.into());
        self
    }

    pub fn value(mut self, value: impl Into<Value>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn href(mut self, href: impl Into<String>) -> Self {
        self.href = Some(href.into());
        self
    }

    pub fn key_code(mut self, code: u32) -> Self {
        self.key_code = Some(code);
        self
    }

    pub fn tag_name(mut self, tag: impl Into<String>) -> Self {
        self.tag_name = Some(tag.into());
        self
    }

    /// Attach the event to a sub-frame.
    pub fn frame(mut self, id: u64, url: impl Into<String>) -> Self {
        self.frame_id = Some(id);
        self.frame_url = Some(url.into());
        self
    }

    /// The recognized kind of this event, if any.
    pub fn kind(&self) -> Option<EventKind> {
        EventKind::parse(&self.action)
    }

    /// Sub-frame id, with zero folded into `None`.
    pub fn sub_frame(&self) -> Option<u64> {
        self.frame_id.filter(|&id| id != 0)
    }

    /// `value` as text: strings verbatim, other scalars in JSON form.
    pub fn value_text(&self) -> Option<String> {
        match self.value.as_ref()? {
            Value::Null => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }
}

/// The closed set of event kinds the generator lowers to commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    KeyDown,
    Click,
    Change,
    Goto,
    Viewport,
    Navigation,
    Screenshot,
}

impl EventKind {
    /// Map a recorder action string to a kind.
    ///
    /// DOM events arrive lower-case; the recorder's synthetic events arrive
    /// upper-case, but either spelling is accepted for those.
    pub fn parse(action: &str) -> Option<Self> {
        match action {
            "keydown" => Some(Self::KeyDown),
            "click" => Some(Self::Click),
            "change" => Some(Self::Change),
            "GOTO" | "goto" => Some(Self::Goto),
            "VIEWPORT" | "viewport" => Some(Self::Viewport),
            "NAVIGATION" | "navigation" => Some(Self::Navigation),
            "SCREENSHOT" | "screenshot" => Some(Self::Screenshot),
            _ => None,
        }
    }

    /// Short name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Self::KeyDown => "keydown",
            Self::Click => "click",
            Self::Change => "change",
            Self::Goto => "goto",
            Self::Viewport => "viewport",
            Self::Navigation => "navigation",
            Self::Screenshot => "screenshot",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
