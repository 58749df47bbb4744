use std::io::{self, Write};

/// Program output sink that remembers whether the current line is open.
///
/// Program output has no trailing newline, so the REPL ends the line itself,
/// and only when a call printed something.
pub struct Console<W: Write> {
    out: W,
    line_open: bool,
}

impl<W: Write> Console<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            line_open: false,
        }
    }

    /// Terminate the line if program output left one open.
    pub fn end_line(&mut self) -> io::Result<()> {
        if self.line_open {
            self.line_open = false;
            self.out.write_all(b"\n")?;
            self.out.flush()?;
        }
        Ok(())
    }

    #[cfg(test)]
    pub fn get_ref(&self) -> &W {
        &self.out
    }
}

impl<W: Write> Write for Console<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let written = self.out.write(buf)?;
        if written > 0 {
            self.line_open = true;
        }
        Ok(written)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}
