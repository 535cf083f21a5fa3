//! Terminal view abstraction.
//!
//! The engine only appends output and occasionally wipes everything. How the
//! output is rendered (escape sequence handling, scrollback) is the view's
//! business.

use std::io::{self, Write};

use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::terminal::{Clear, ClearType};

/// Destination for dispatched output.
pub trait TerminalView {
    /// Append raw output.
    fn write(&mut self, text: &str) -> io::Result<()>;

    /// Wipe all rendered output.
    fn clear(&mut self) -> io::Result<()>;
}

/// Writes output straight to a terminal.
pub struct StdoutView<W: Write = io::Stdout> {
    out: W,
    /// Expand bare `\n` to `\r\n` (raw mode disables the tty's own translation)
    crlf: bool,
    last_was_cr: bool,
}

impl StdoutView<io::Stdout> {
    pub fn new() -> Self {
        Self::with_writer(io::stdout())
    }
}

impl Default for StdoutView<io::Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> StdoutView<W> {
    /// Create a view over any writer (for testing).
    pub fn with_writer(out: W) -> Self {
        Self {
            out,
            crlf: false,
            last_was_cr: false,
        }
    }

    /// Translate bare line feeds for a terminal in raw mode.
    pub fn translate_newlines(mut self, enabled: bool) -> Self {
        self.crlf = enabled;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> TerminalView for StdoutView<W> {
    fn write(&mut self, text: &str) -> io::Result<()> {
        if self.crlf {
            let mut translated = String::with_capacity(text.len() + 16);
            for c in text.chars() {
                if c == '\n' && !self.last_was_cr {
                    translated.push('\r');
                }
                translated.push(c);
                self.last_was_cr = c == '\r';
            }
            self.out.write_all(translated.as_bytes())?;
        } else {
            self.out.write_all(text.as_bytes())?;
        }
        self.out.flush()
    }

    fn clear(&mut self) -> io::Result<()> {
        self.last_was_cr = false;
        queue!(self.out, Clear(ClearType::All), MoveTo(0, 0))?;
        self.out.flush()
    }
}

/// Records everything written since the last clear.
#[derive(Debug, Clone, Default)]
pub struct MemoryView {
    contents: String,
    clears: usize,
}

impl MemoryView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Output written since the last clear.
    pub fn contents(&self) -> &str {
        &self.contents
    }

    /// Number of times the view was cleared.
    pub fn clear_count(&self) -> usize {
        self.clears
    }

    pub fn into_contents(self) -> String {
        self.contents
    }
}

impl TerminalView for MemoryView {
    fn write(&mut self, text: &str) -> io::Result<()> {
        self.contents.push_str(text);
        Ok(())
    }

    fn clear(&mut self) -> io::Result<()> {
        self.contents.clear();
        self.clears += 1;
        Ok(())
    }
}
