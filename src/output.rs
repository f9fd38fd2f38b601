use std::io::{self, Write};

use anyhow::Result;
use serde::Serialize;

/// Prefix added per nesting level by [`IndentWriter`].
pub const INDENT: &str = "  ";

/// Print a serializable value as pretty JSON on stdout
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Writer that prefixes every line written through it with a fixed indent.
///
/// Wrapping an `IndentWriter` in another one adds a second level. Blank lines are
/// passed through without the prefix so reports carry no trailing whitespace.
pub struct IndentWriter<W: Write> {
    inner: W,
    prefix: &'static str,
    at_line_start: bool,
}

impl<W: Write> IndentWriter<W> {
    pub fn new(inner: W) -> Self {
        Self::with_prefix(inner, INDENT)
    }

    pub fn with_prefix(inner: W, prefix: &'static str) -> Self {
        Self {
            inner,
            prefix,
            at_line_start: true,
        }
    }
}

impl<W: Write> Write for IndentWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        for line in buf.split_inclusive(|&b| b == b'\n') {
            if self.at_line_start && line != b"\n" {
                self.inner.write_all(self.prefix.as_bytes())?;
            }
            self.inner.write_all(line)?;
            self.at_line_start = line.ends_with(b"\n");
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

/// Writer that keeps going after a failed write and remembers the first error.
///
/// Every write reports success to the caller; the first underlying failure is
/// returned by [`ErrWriter::finish`] once the whole report has been attempted.
pub struct ErrWriter<W: Write> {
    inner: W,
    err: Option<io::Error>,
}

impl<W: Write> ErrWriter<W> {
    pub fn new(inner: W) -> Self {
        Self { inner, err: None }
    }

    /// Flush the sink and return the first error seen by any write or the flush.
    pub fn finish(mut self) -> io::Result<()> {
        if let Err(e) = self.inner.flush() {
            self.record(e);
        }
        match self.err {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    fn record(&mut self, e: io::Error) {
        tracing::debug!(error = %e, "report write failed");
        if self.err.is_none() {
            self.err = Some(e);
        }
    }
}

impl<W: Write> Write for ErrWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if let Err(e) = self.inner.write_all(buf) {
            self.record(e);
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        if let Err(e) = self.inner.flush() {
            self.record(e);
        }
        Ok(())
    }
}
