//! Indented text assembly for generated source.

/// Accumulates generated lines under a running indent level.
#[derive(Debug, Default)]
pub(crate) struct SourceWriter {
    buf: String,
    depth: usize,
}

const INDENT: &str = "  ";

impl SourceWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one line at the current indent.
    pub fn line(&mut self, text: &str) {
        for _ in 0..self.depth {
            self.buf.push_str(INDENT);
        }
        self.buf.push_str(text);
        self.buf.push('\n');
    }

    pub fn indent(&mut self) {
        self.depth += 1;
    }

    pub fn dedent(&mut self) {
        debug_assert!(self.depth > 0, "dedent below zero");
        self.depth = self.depth.saturating_sub(1);
    }

    pub fn into_string(self) -> String {
        self.buf
    }
}
