//! Line-aware output buffer shared by the scanners.

/// Accumulates scanner output one line at a time.
///
/// A line left whitespace-only by comment removal is dropped together with
/// its newline. A line that still carries code keeps its newline, so
/// truncating a trailing comment never merges lines.
#[derive(Debug, Default)]
pub(crate) struct LineSink {
    out: String,
    line: String,
    removed: bool,
    truncated: bool,
}

impl LineSink {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            out: String::with_capacity(capacity),
            ..Self::default()
        }
    }

    /// Append text, which may span several lines.
    pub(crate) fn push_str(&mut self, text: &str) {
        let mut rest = text;
        while let Some(idx) = rest.find('\n') {
            self.push_fragment(&rest[..idx]);
            self.end_line();
            rest = &rest[idx + 1..];
        }
        self.push_fragment(rest);
    }

    /// Record that a comment was dropped on the current line.
    pub(crate) fn mark_removed(&mut self) {
        self.removed = true;
    }

    /// Drop the rest of the current line.
    pub(crate) fn truncate(&mut self) {
        self.removed = true;
        self.truncated = true;
    }

    /// Whether the current line holds nothing but whitespace so far.
    pub(crate) fn line_is_blank(&self) -> bool {
        self.line.trim().is_empty()
    }

    pub(crate) fn finish(mut self) -> String {
        if !self.drops_line() {
            self.out.push_str(&self.line);
        }
        self.out
    }

    fn push_fragment(&mut self, fragment: &str) {
        if !self.truncated {
            self.line.push_str(fragment);
        }
    }

    fn drops_line(&self) -> bool {
        self.removed && self.line.trim().is_empty()
    }

    fn end_line(&mut self) {
        if !self.drops_line() {
            self.out.push_str(&self.line);
            self.out.push('\n');
        }
        self.line.clear();
        self.removed = false;
        self.truncated = false;
    }
}
