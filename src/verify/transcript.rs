/// Ordered human-readable transcript.
///
/// One line per recorded fact, with two spaces of indentation per nesting
/// depth. Line order is part of the output contract, so facts are appended
/// strictly in traversal order.
#[derive(Debug, Default)]
pub struct Transcript {
    lines: Vec<String>,
}

impl Transcript {
    /// Create an empty transcript.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a line at the given depth.
    pub fn line(&mut self, depth: usize, text: impl AsRef<str>) {
        let mut line = String::with_capacity(depth * 2 + text.as_ref().len());
        for _ in 0..depth {
            line.push_str("  ");
        }
        line.push_str(text.as_ref());
        self.lines.push(line);
    }

    /// Append a blank separator line.
    pub fn blank(&mut self) {
        self.lines.push(String::new());
    }

    /// The recorded lines, in order.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Render the transcript as one newline-terminated string.
    pub fn render(&self) -> String {
        let mut out = self.lines.join("\n");
        out.push('\n');
        out
    }
}
