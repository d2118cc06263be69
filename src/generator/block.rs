/// What produced a line. Used for diagnostics and tests, never for dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineKind {
    Type,
    WaitForSelector,
    Click,
    Select,
    Goto,
    Viewport,
    Screenshot,
    Navigation,
    NavigationPromise,
    FrameSet,
    Blank,
}

/// One line of generated script, without indentation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub kind: LineKind,
    pub text: String,
    /// Sub-frame the command runs against, `None` for the main document.
    pub frame_id: Option<u64>,
}

impl Line {
    pub fn new(kind: LineKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
            frame_id: None,
        }
    }

    pub fn in_frame(mut self, frame_id: Option<u64>) -> Self {
        self.frame_id = frame_id;
        self
    }
}

/// An ordered group of lines produced by one event or by a post-processing pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Block {
    frame_id: Option<u64>,
    lines: Vec<Line>,
}

impl Block {
    /// Create an empty block.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a block for a frame with its initial lines.
    pub fn with_lines(frame_id: Option<u64>, lines: Vec<Line>) -> Self {
        Self { frame_id, lines }
    }

    /// A block holding a single empty line.
    pub fn blank() -> Self {
        Self::with_lines(None, vec![Line::new(LineKind::Blank, "")])
    }

    pub fn push(&mut self, line: Line) {
        self.lines.push(line);
    }

    /// Insert a line before all existing lines.
    pub fn push_front(&mut self, line: Line) {
        self.lines.insert(0, line);
    }

    /// Replace the text of the first line matching `pred`.
    pub fn replace_first(&mut self, pred: impl Fn(&Line) -> bool, text: String) -> bool {
        match self.lines.iter_mut().find(|l| pred(l)) {
            Some(line) => {
                line.text = text;
                true
            }
            None => false,
        }
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn frame_id(&self) -> Option<u64> {
        self.frame_id
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn is_blank(&self) -> bool {
        self.lines.iter().all(|l| l.kind == LineKind::Blank)
    }

    /// Sub-frame ids referenced by this block's lines, in line order.
    pub fn frame_refs(&self) -> impl Iterator<Item = u64> + '_ {
        self.lines.iter().filter_map(|l| l.frame_id)
    }
}
