//! Console output for checks.
//!
//! The console is the only externally visible interface of the kit: every
//! check echoes its actual value here and failures add an error-tagged
//! line. The default console is stdout. An in-memory buffer console lets
//! tests read back exactly what would have been printed.

use parking_lot::{Mutex, MutexGuard};
use std::io::{self, Write};
use std::sync::Arc;

/// Cloneable in-memory sink.
#[derive(Debug, Clone, Default)]
pub struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    /// Drain the buffered bytes as text.
    pub fn take(&self) -> String {
        let bytes = std::mem::take(&mut *self.0.lock());
        String::from_utf8_lossy(&bytes).into_owned()
    }

    /// Copy of the buffered text, leaving it in place.
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock()).into_owned()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Locked console; lines written through one guard stay together.
pub(crate) struct ConsoleGuard<'c>(MutexGuard<'c, Box<dyn Write + Send>>);

impl ConsoleGuard<'_> {
    /// Write one line of text.
    ///
    /// Console failures are not assertion failures, so write errors are
    /// dropped here.
    pub(crate) fn line(&mut self, text: &str) {
        let _ = writeln!(self.0, "{text}");
        let _ = self.0.flush();
    }

    /// Write one line prefixed with the error tag.
    pub(crate) fn tagged_line(&mut self, tag: &str, text: &str) {
        let _ = writeln!(self.0, "{tag}{text}");
        let _ = self.0.flush();
    }
}

/// Destination of check output.
pub struct Console {
    writer: Mutex<Box<dyn Write + Send>>,
    buffer: Option<SharedBuffer>,
}

impl Console {
    /// Console writing to stdout.
    pub fn stdout() -> Self {
        Self::with_writer(Box::new(io::stdout()))
    }

    /// Console collecting output in memory.
    pub fn buffer() -> Self {
        let buffer = SharedBuffer::default();
        Self {
            writer: Mutex::new(Box::new(buffer.clone())),
            buffer: Some(buffer),
        }
    }

    /// Console writing to an arbitrary sink.
    pub fn with_writer(writer: Box<dyn Write + Send>) -> Self {
        Self {
            writer: Mutex::new(writer),
            buffer: None,
        }
    }

    /// Drain the text collected by a buffer console. Empty for other consoles.
    pub fn take_output(&self) -> String {
        self.buffer.as_ref().map(SharedBuffer::take).unwrap_or_default()
    }

    pub(crate) fn lock(&self) -> ConsoleGuard<'_> {
        ConsoleGuard(self.writer.lock())
    }
}

impl std::fmt::Debug for Console {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Console")
            .field("buffered", &self.buffer.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_collects_lines() {
        let console = Console::buffer();
        {
            let mut out = console.lock();
            out.line("first");
            out.tagged_line("[Error]: ", "1 != 2");
        }
        assert_eq!(console.take_output(), "first\n[Error]: 1 != 2\n");
        assert_eq!(console.take_output(), "");
    }

    #[test]
    fn test_custom_writer() {
        let sink = SharedBuffer::default();
        let console = Console::with_writer(Box::new(sink.clone()));
        console.lock().line("hello");
        assert_eq!(sink.contents(), "hello\n");
        assert_eq!(console.take_output(), "");
    }
}
