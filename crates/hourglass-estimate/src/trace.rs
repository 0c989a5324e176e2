//! In-memory trace sink for the estimation run.
//!
//! The engine writes its human-readable table here instead of to a
//! process-global log destination; the caller owns the buffer and decides
//! where its contents end up (stdout, a log file, a test assertion).

use std::io::Write;

/// An append-only buffer of trace lines.
///
/// # Examples
///
/// ```
/// use hourglass_estimate::trace::TraceSink;
///
/// let mut sink = TraceSink::new();
/// sink.line("Total Commits: 3");
/// assert_eq!(sink.contents(), "Total Commits: 3\n");
/// ```
#[derive(Debug, Default)]
pub struct TraceSink {
    buffer: String,
}

impl TraceSink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one line, terminated with a newline.
    pub fn line(&mut self, line: impl AsRef<str>) {
        self.buffer.push_str(line.as_ref());
        self.buffer.push('\n');
    }

    /// The accumulated trace text.
    pub fn contents(&self) -> &str {
        &self.buffer
    }

    /// Whether anything has been traced yet.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Write the accumulated trace to `writer`.
    ///
    /// # Errors
    ///
    /// Propagates any I/O error from the writer.
    pub fn write_to(&self, writer: &mut impl Write) -> std::io::Result<()> {
        writer.write_all(self.buffer.as_bytes())
    }
}
