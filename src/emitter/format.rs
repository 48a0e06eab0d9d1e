//! Indentation management for emitted Malloy.

/// Indentation style for emitted Malloy.
#[derive(Debug, Clone)]
pub enum Indent {
    Tabs,
    Spaces(usize),
}

impl Default for Indent {
    /// Two spaces, the layout Malloy's own formatter uses.
    fn default() -> Self {
        Indent::Spaces(2)
    }
}

impl Indent {
    fn unit(&self) -> String {
        match self {
            Indent::Tabs => "\t".to_string(),
            Indent::Spaces(n) => " ".repeat(*n),
        }
    }
}

/// Line-oriented writer that tracks the current indentation depth.
pub struct IndentWriter {
    buffer: String,
    unit: String,
    depth: usize,
}

impl IndentWriter {
    #[must_use]
    pub fn new(indent: Indent) -> Self {
        Self {
            buffer: String::new(),
            unit: indent.unit(),
            depth: 0,
        }
    }

    pub fn indent(&mut self) {
        self.depth += 1;
    }

    /// Decrease indentation level. Saturates at zero.
    pub fn dedent(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// Write one line at the current depth, newline included.
    pub fn write_line(&mut self, line: &str) {
        for _ in 0..self.depth {
            self.buffer.push_str(&self.unit);
        }
        self.buffer.push_str(line);
        self.buffer.push('\n');
    }

    /// Open a `<header> {` block and indent.
    pub fn open_block(&mut self, header: &str) {
        self.write_line(&format!("{} {{", header));
        self.indent();
    }

    /// Dedent and close the innermost block.
    pub fn close_block(&mut self) {
        self.dedent();
        self.write_line("}");
    }

    #[must_use]
    pub fn into_string(self) -> String {
        self.buffer
    }
}

impl Default for IndentWriter {
    fn default() -> Self {
        Self::new(Indent::default())
    }
}
