//! Line-oriented text emitter with indentation tracking.

///
/// EmittedLine
///

#[derive(Clone, Debug, Default)]
struct EmittedLine {
    indent: usize,
    parts: Vec<String>,
}

impl EmittedLine {
    const fn new(indent: usize) -> Self {
        Self {
            indent,
            parts: Vec::new(),
        }
    }

    const fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }
}

///
/// Emitter
///
/// Parts accumulate on the current line; `println` closes it. Empty lines
/// never carry indentation, so output has no trailing whitespace.
///

pub(crate) struct Emitter {
    lines: Vec<EmittedLine>,
    current: EmittedLine,
    indent: usize,
    indent_unit: String,
}

impl Emitter {
    pub(crate) fn new(indent_width: usize) -> Self {
        Self {
            lines: Vec::new(),
            current: EmittedLine::new(0),
            indent: 0,
            indent_unit: " ".repeat(indent_width),
        }
    }

    pub(crate) fn print(&mut self, part: impl Into<String>) {
        let part = part.into();
        if !part.is_empty() {
            self.current.parts.push(part);
        }
    }

    pub(crate) fn println(&mut self, part: impl Into<String>) {
        self.print(part);
        let line = std::mem::replace(&mut self.current, EmittedLine::new(self.indent));
        self.lines.push(line);
    }

    /// Emit one empty line, collapsing runs of blank lines into one.
    pub(crate) fn blank_line(&mut self) {
        if !self.current.is_empty() {
            self.println("");
        }
        if self.lines.last().is_some_and(|line| !line.is_empty()) {
            self.lines.push(EmittedLine::new(0));
        }
    }

    pub(crate) fn inc_indent(&mut self) {
        self.indent += 1;
        if self.current.is_empty() {
            self.current.indent = self.indent;
        }
    }

    pub(crate) fn dec_indent(&mut self) {
        self.indent = self.indent.saturating_sub(1);
        if self.current.is_empty() {
            self.current.indent = self.indent;
        }
    }

    /// Join all lines; the result always ends with exactly one newline.
    pub(crate) fn into_source(mut self) -> String {
        if !self.current.is_empty() {
            self.println("");
        }
        while self.lines.last().is_some_and(EmittedLine::is_empty) {
            self.lines.pop();
        }

        let mut out = String::new();
        for line in &self.lines {
            if !line.is_empty() {
                out.push_str(&self.indent_unit.repeat(line.indent));
                out.push_str(&line.parts.concat());
            }
            out.push('\n');
        }

        out
    }
}
