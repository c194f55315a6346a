//! Indentation-aware source writer.

/// Indentation helper
#[derive(Debug, Clone, Copy)]
struct Indent {
    level: usize,
    size: usize,
}

impl Indent {
    fn prefix(&self) -> String {
        " ".repeat(self.level * self.size)
    }
}

/// Accumulates Python source line by line.
///
/// Blocks opened with [`CodeWriter::open_block`] that receive no statement
/// are closed with `pass`, so an empty class or method body is always valid.
#[derive(Debug)]
pub struct CodeWriter {
    out: String,
    indent: Indent,
    /// Statements written into each open block
    block_lines: Vec<usize>,
}

impl CodeWriter {
    pub fn new(indent_width: usize) -> Self {
        Self {
            out: String::new(),
            indent: Indent {
                level: 0,
                size: indent_width,
            },
            block_lines: Vec::new(),
        }
    }

    /// Write one line at the current indentation.
    pub fn line(&mut self, text: impl AsRef<str>) {
        let text = text.as_ref();
        if text.is_empty() {
            self.out.push('\n');
            return;
        }
        self.out.push_str(&self.indent.prefix());
        self.out.push_str(text);
        self.out.push('\n');
        if let Some(count) = self.block_lines.last_mut() {
            *count += 1;
        }
    }

    pub fn blank(&mut self) {
        self.out.push('\n');
    }

    /// Write `header` (which must end with `:`) and indent.
    pub fn open_block(&mut self, header: impl AsRef<str>) {
        self.line(header);
        self.indent.level += 1;
        self.block_lines.push(0);
    }

    pub fn close_block(&mut self) {
        if self.block_lines.last() == Some(&0) {
            self.line("pass");
        }
        self.block_lines.pop();
        self.indent.level = self.indent.level.saturating_sub(1);
    }

    /// Write a docstring when a summary is present. The closing quotes go on
    /// their own line when the text spans lines or ends with a quote.
    pub fn docstring(&mut self, summary: Option<&str>) {
        let Some(summary) = summary.map(str::trim).filter(|s| !s.is_empty()) else {
            return;
        };
        let escaped = summary.replace('\\', "\\\\").replace("\"\"\"", "\\\"\\\"\\\"");
        let mut lines = escaped.lines();
        let first = lines.next().unwrap_or_default();
        let rest: Vec<&str> = lines.collect();
        if rest.is_empty() && !first.ends_with('"') {
            self.line(format!("\"\"\"{first}\"\"\""));
            return;
        }
        self.line(format!("\"\"\"{first}"));
        for line in rest {
            self.line(line.trim_end());
        }
        self.line("\"\"\"");
    }

    pub fn finish(mut self) -> String {
        while self.out.ends_with("\n\n") {
            self.out.pop();
        }
        self.out
    }
}
