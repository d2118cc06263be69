use super::block::{Block, Line, LineKind};
use super::templates::Command;
use super::{GenerationContext, SkipReason};
use crate::config::{Event, EventKind, TAB_KEY_CODE};
use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

/// Block produced by a handler, `None` when the event is consumed silently.
pub(super) type Handled = std::result::Result<Option<Block>, SkipReason>;

/// A number followed by a two-letter unit, e.g. `120px`.
static UNIT_SUFFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(-?\d+(?:\.\d+)?)[A-Za-z]{2}$").expect("unit pattern is valid")
});

impl GenerationContext<'_> {
    /// Lower one event against the current frame.
    pub(super) fn handle(&mut self, event: &Event) -> Handled {
        let Some(kind) = event.kind() else {
            return Err(SkipReason::UnknownAction);
        };
        match kind {
            EventKind::KeyDown => self.handle_key_down(event),
            EventKind::Click => self.handle_click(event),
            EventKind::Change => self.handle_change(event),
            EventKind::Goto => self.handle_goto(event),
            EventKind::Viewport => self.handle_viewport(event),
            EventKind::Navigation => Ok(self.handle_navigation()),
            EventKind::Screenshot => self.handle_screenshot(event),
        }
    }

    /// Only tab is lowered: the recorder treats it as "field done".
    fn handle_key_down(&self, event: &Event) -> Handled {
        if event.key_code != Some(TAB_KEY_CODE) {
            return Err(SkipReason::NonTabKey);
        }
        let selector = required(event.selector.as_deref(), "selector")?;
        let value = event.value_text().unwrap_or_default();
        let line = self.line(
            LineKind::Type,
            Command::Type,
            &[("selector", selector), ("value", value.as_str())],
        );
        Ok(Some(self.block(vec![line])))
    }

    fn handle_click(&self, event: &Event) -> Handled {
        let selector = required(event.selector.as_deref(), "selector")?;
        let vars = [("selector", selector)];
        let mut lines = Vec::with_capacity(2);
        if self.options.wait_for_selector_on_click {
            lines.push(self.line(LineKind::WaitForSelector, Command::WaitForSelector, &vars));
        }
        lines.push(self.line(LineKind::Click, Command::Click, &vars));
        Ok(Some(self.block(lines)))
    }

    fn handle_change(&self, event: &Event) -> Handled {
        let is_select = event
            .tag_name
            .as_deref()
            .is_some_and(|t| t.eq_ignore_ascii_case("select"));
        if !is_select {
            return Err(SkipReason::NonSelectChange);
        }
        let selector = required(event.selector.as_deref(), "selector")?;
        let value = event.value_text().unwrap_or_default();
        let line = self.line(
            LineKind::Select,
            Command::Select,
            &[("selector", selector), ("value", value.as_str())],
        );
        Ok(Some(self.block(vec![line])))
    }

    fn handle_goto(&self, event: &Event) -> Handled {
        let href = required(event.href.as_deref(), "href")?;
        let line = self.line(LineKind::Goto, Command::Goto, &[("href", href)]);
        Ok(Some(self.block(vec![line])))
    }

    fn handle_viewport(&self, event: &Event) -> Handled {
        let width = field(event, "width").ok_or(SkipReason::MissingField("width"))?;
        let height = field(event, "height").ok_or(SkipReason::MissingField("height"))?;
        let line = self.line(
            LineKind::Viewport,
            Command::Viewport,
            &[("width", width.as_str()), ("height", height.as_str())],
        );
        Ok(Some(self.block(vec![line])))
    }

    /// Always records that a navigation happened; only waits when asked to.
    fn handle_navigation(&mut self) -> Option<Block> {
        self.saw_navigation = true;
        if !self.options.wait_for_navigation {
            return None;
        }
        let line = Line::new(
            LineKind::Navigation,
            self.dialect.render(Command::WaitForNavigation, &[]),
        );
        Some(self.block(vec![line]))
    }

    /// Clipped when the value carries all of x, y, width and height.
    fn handle_screenshot(&mut self, event: &Event) -> Handled {
        let n = self.next_screenshot.to_string();
        self.next_screenshot = self
            .next_screenshot
            .checked_add(1)
            .ok_or(SkipReason::ScreenshotCounterExhausted)?;

        let clip: Option<Vec<String>> = ["x", "y", "width", "height"]
            .iter()
            .map(|key| field(event, key).map(|v| strip_unit(&v).to_string()))
            .collect();

        let line = match clip {
            Some(c) => self.line(
                LineKind::Screenshot,
                Command::ClippedScreenshot,
                &[
                    ("n", n.as_str()),
                    ("x", c[0].as_str()),
                    ("y", c[1].as_str()),
                    ("width", c[2].as_str()),
                    ("height", c[3].as_str()),
                ],
            ),
            None => self.line(LineKind::Screenshot, Command::Screenshot, &[("n", n.as_str())]),
        };
        Ok(Some(self.block(vec![line])))
    }

    /// Render a command against the current frame.
    fn line(&self, kind: LineKind, command: Command, vars: &[(&str, &str)]) -> Line {
        let frame = self.frames.current();
        let mut all = Vec::with_capacity(vars.len() + 1);
        all.push(("frame", frame.name.as_str()));
        all.extend_from_slice(vars);
        Line::new(kind, self.dialect.render(command, &all)).in_frame(frame.id)
    }

    fn block(&self, lines: Vec<Line>) -> Block {
        Block::with_lines(self.frames.current().id, lines)
    }
}

fn required<'e>(value: Option<&'e str>, name: &'static str) -> Result<&'e str, SkipReason> {
    value.ok_or(SkipReason::MissingField(name))
}

/// A member of the event's value object, as text.
fn field(event: &Event, key: &str) -> Option<String> {
    match event.value.as_ref()?.get(key)? {
        Value::Null => None,
        Value::String(s) => Some(s.trim().to_string()),
        other => Some(other.to_string()),
    }
}

/// `"120px"` becomes `"120"`; anything not shaped like a number plus unit is kept.
fn strip_unit(text: &str) -> &str {
    match UNIT_SUFFIX.captures(text).and_then(|c| c.get(1)) {
        Some(number) => number.as_str(),
        None => text,
    }
}
