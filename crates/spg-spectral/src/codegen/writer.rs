const INDENT: &str = "  ";

/// Append-only text builder that tracks indentation.
///
/// Indentation is written lazily at the start of each non-empty line, so
/// blank lines never carry trailing whitespace.
#[derive(Debug, Default)]
pub struct SourceWriter {
    buf: String,
    level: usize,
    at_line_start: bool,
}

impl SourceWriter {
    pub fn new() -> Self {
        Self {
            buf: String::new(),
            level: 0,
            at_line_start: true,
        }
    }

    /// Append text to the current line. The text must not contain newlines.
    pub fn write(&mut self, text: &str) -> &mut Self {
        if text.is_empty() {
            return self;
        }
        if self.at_line_start {
            for _ in 0..self.level {
                self.buf.push_str(INDENT);
            }
            self.at_line_start = false;
        }
        self.buf.push_str(text);
        self
    }

    pub fn write_line(&mut self, text: &str) -> &mut Self {
        self.write(text).newline()
    }

    pub fn newline(&mut self) -> &mut Self {
        self.buf.push('\n');
        self.at_line_start = true;
        self
    }

    /// Run `f` one indentation level deeper.
    pub fn indent(&mut self, f: impl FnOnce(&mut Self)) -> &mut Self {
        self.level += 1;
        f(self);
        self.level -= 1;
        self
    }

    /// Write `{`, the indented body, then `}` on its own line.
    pub fn block(&mut self, f: impl FnOnce(&mut Self)) -> &mut Self {
        self.write_line("{");
        self.indent(f);
        self.write("}")
    }

    pub fn conditional_write(&mut self, condition: bool, text: impl FnOnce() -> String) -> &mut Self {
        if condition {
            self.write(&text());
        }
        self
    }

    pub fn conditional_write_line(
        &mut self,
        condition: bool,
        text: impl FnOnce() -> String,
    ) -> &mut Self {
        if condition {
            self.write_line(&text());
        }
        self
    }

    pub fn into_string(self) -> String {
        self.buf
    }
}
