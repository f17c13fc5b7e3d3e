//! Line-oriented prompt handling for the interactive shell.

use std::io::{self, BufRead, Write};

use crate::error::{Error, Result};
use crate::shell::colors::Palette;

/// Paired input and output streams with prompt helpers.
pub struct Console<R, W> {
    input: R,
    output: W,
    pub palette: Palette,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W, palette: Palette) -> Self {
        Console { input, output, palette }
    }

    /// Print `label`, then read one line.
    ///
    /// Returns the trimmed line, or `None` once input is exhausted. Bytes
    /// that are not valid UTF-8 become U+FFFD rather than an error.
    pub fn prompt(&mut self, label: &str) -> io::Result<Option<String>> {
        write!(self.output, "{label}")?;
        self.output.flush()?;
        let mut buf = Vec::new();
        if self.input.read_until(b'\n', &mut buf)? == 0 {
            return Ok(None);
        }
        Ok(Some(String::from_utf8_lossy(&buf).trim().to_string()))
    }

    /// Block until the user presses Enter. `false` means input has ended.
    pub fn pause(&mut self) -> io::Result<bool> {
        Ok(self.prompt("Press Enter to continue...")?.is_some())
    }

    pub fn success(&mut self, msg: &str) -> io::Result<()> {
        let line = self.palette.success(msg);
        writeln!(self.output, "{line}")
    }

    pub fn error(&mut self, msg: &str) -> io::Result<()> {
        let line = self.palette.error(&format!("❌ {msg}"));
        writeln!(self.output, "{line}")
    }

    pub fn out(&mut self) -> &mut W {
        &mut self.output
    }
}

/// Parse a task ID typed at a prompt.
pub fn parse_id(raw: &str) -> Result<u64> {
    raw.trim()
        .parse::<u64>()
        .map_err(|_| Error::InvalidInput("ID must be a number!".into()))
}

/// Blank input means "keep the current value".
pub fn non_blank(raw: String) -> Option<String> {
    if raw.trim().is_empty() {
        None
    } else {
        Some(raw)
    }
}
