use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::Path;

// ─── LineSink Trait ─────────────────────────────────────────────────────────

/// Destination for flushed text lines. Lines are passed without a newline.
pub trait LineSink {
    fn write_line(&mut self, line: &str) -> io::Result<()>;

    /// Called once after the last line of a flush.
    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Collects lines in memory.
impl LineSink for Vec<String> {
    fn write_line(&mut self, line: &str) -> io::Result<()> {
        self.push(line.to_owned());
        Ok(())
    }
}

impl<S: LineSink + ?Sized> LineSink for &mut S {
    fn write_line(&mut self, line: &str) -> io::Result<()> {
        (**self).write_line(line)
    }

    fn flush(&mut self) -> io::Result<()> {
        (**self).flush()
    }
}

// ─── WriterSink ─────────────────────────────────────────────────────────────

/// Newline-terminated lines over any [`io::Write`].
pub struct WriterSink<W: Write> {
    inner: W,
}

impl<W: Write> WriterSink<W> {
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> LineSink for WriterSink<W> {
    fn write_line(&mut self, line: &str) -> io::Result<()> {
        self.inner.write_all(line.as_bytes())?;
        self.inner.write_all(b"\n")
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

/// Append-only file sink.
pub type FileSink = WriterSink<BufWriter<File>>;

impl FileSink {
    /// Open `path` for appending, creating it if missing.
    pub fn append_to(path: impl AsRef<Path>) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self::new(BufWriter::new(file)))
    }
}
