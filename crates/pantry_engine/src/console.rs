/* 📖 # Why wrap stdin/stdout in a Console?

The menu reads a mix of single tokens (menu choices, numbers) and whole lines
(names, index lists), and after a bad number it must throw away the rest of the
line so the next prompt starts clean. Console keeps the current input line and
a read position to support exactly that, and takes its reader and writers as
boxed trait objects so tests can script a session and capture what was printed.
*/

use std::fmt::Display;
use std::io::{BufRead, Write};
#[cfg(test)]
use std::sync::{Arc, Mutex};

use pantry_base::{PantryError, PantryResult};

/// Line-oriented console with token and field reads over any reader/writers.
pub struct Console {
    input: Box<dyn BufRead>,
    out: Box<dyn Write>,
    err: Box<dyn Write>,
    line: String,
    pos: usize,
}

impl Console {
    pub fn new(
        input: impl BufRead + 'static,
        out: impl Write + 'static,
        err: impl Write + 'static,
    ) -> Self {
        Self {
            input: Box::new(input),
            out: Box::new(out),
            err: Box::new(err),
            line: String::new(),
            pos: 0,
        }
    }

    /// Console over the process's stdin, stdout and stderr.
    pub fn stdio() -> Self {
        Self::new(
            std::io::stdin().lock(),
            std::io::stdout(),
            std::io::stderr(),
        )
    }

    /// Next whitespace-delimited token, reading further lines as needed.
    /// Returns `None` at end of input.
    pub fn next_token(&mut self) -> PantryResult<Option<String>> {
        if !self.skip_whitespace()? {
            return Ok(None);
        }
        let rest = &self.line[self.pos..];
        let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
        let token = rest[..end].to_string();
        self.pos += end;
        Ok(Some(token))
    }

    /// Skips whitespace (including line breaks), then returns the rest of the
    /// current line without its line ending. Returns `None` at end of input.
    pub fn next_field(&mut self) -> PantryResult<Option<String>> {
        if !self.skip_whitespace()? {
            return Ok(None);
        }
        let field = self.line[self.pos..].trim_end_matches(['\n', '\r']).to_string();
        self.pos = self.line.len();
        Ok(Some(field))
    }

    /// Drops whatever is left of the current input line.
    pub fn discard_line(&mut self) {
        self.pos = self.line.len();
    }

    /// Writes `text` to the output without a line break and flushes.
    pub fn write(&mut self, text: impl Display) -> PantryResult<()> {
        write!(self.out, "{}", text)
            .and_then(|()| self.out.flush())
            .map_err(console_error)
    }

    /// Writes `text` followed by a line break to the output.
    pub fn line(&mut self, text: impl Display) -> PantryResult<()> {
        writeln!(self.out, "{}", text)
            .and_then(|()| self.out.flush())
            .map_err(console_error)
    }

    /// Writes `text` followed by a line break to the error output.
    pub fn error_line(&mut self, text: impl Display) -> PantryResult<()> {
        writeln!(self.err, "{}", text)
            .and_then(|()| self.err.flush())
            .map_err(console_error)
    }

    /// Advances to the next non-whitespace character. False at end of input.
    fn skip_whitespace(&mut self) -> PantryResult<bool> {
        loop {
            let rest = &self.line[self.pos..];
            match rest.find(|c: char| !c.is_whitespace()) {
                Some(offset) => {
                    self.pos += offset;
                    return Ok(true);
                }
                None => {
                    let mut bytes = Vec::new();
                    let read = self
                        .input
                        .read_until(b'\n', &mut bytes)
                        .map_err(console_error)?;
                    self.pos = 0;
                    if read == 0 {
                        self.line.clear();
                        return Ok(false);
                    }
                    // Input from non-UTF-8 terminals is kept, with U+FFFD for undecodable bytes
                    self.line = String::from_utf8_lossy(&bytes).into_owned();
                }
            }
        }
    }
}

fn console_error(e: std::io::Error) -> Box<PantryError> {
    Box::new(PantryError::message(format!("Console I/O failed: {}", e)))
}

/// Cloneable in-memory writer, handy for capturing console output.
#[cfg(test)]
#[derive(Debug, Clone, Default)]
pub struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

#[cfg(test)]
impl SharedBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, decoded lossily as UTF-8.
    pub fn contents(&self) -> String {
        match self.0.lock() {
            Ok(buffer) => String::from_utf8_lossy(&buffer).into_owned(),
            Err(poisoned) => String::from_utf8_lossy(&poisoned.into_inner()).into_owned(),
        }
    }
}

#[cfg(test)]
impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0
            .lock()
            .map_err(|_| std::io::Error::other("shared buffer poisoned"))?
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}
