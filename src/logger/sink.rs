// src/logger/sink.rs
use super::level::Level;
use crate::utils::error::LogError;
use std::cell::RefCell;
use std::fs::{File, OpenOptions};
use std::io::{self, LineWriter, Write};
use std::path::{Path, PathBuf};
use std::rc::Rc;

/// Console rules derived from the logger's configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConsoleMode {
    pub log_only: bool,
    pub force_out: bool,
    /// Indent console lines by nesting depth (tracing on).
    pub indent: bool,
}

impl ConsoleMode {
    /// Whether a line at `level` reaches the console.
    ///
    /// `force_out` only lets `out` (and `any`) lines through in log-only mode.
    pub fn shows(&self, level: Level) -> bool {
        !self.log_only || (self.force_out && level <= Level::Out)
    }

    pub fn indentation(&self, depth: usize) -> String {
        if self.indent {
            "  ".repeat(depth)
        } else {
            String::new()
        }
    }
}

struct LogTarget {
    path: Option<PathBuf>,
    writer: Box<dyn Write>,
}

/// Console writer plus an optional append-only log writer.
///
/// The log writer is flushed and released exactly once, by [`Sink::close`]
/// or on drop.
pub struct Sink {
    console: Box<dyn Write>,
    log: Option<LogTarget>,
}

impl Sink {
    /// Console on stdout, no log file.
    pub fn stdout() -> Self {
        Self::with_console(Box::new(io::stdout()))
    }

    pub fn with_console(console: Box<dyn Write>) -> Self {
        Self { console, log: None }
    }

    /// Opens `path` for appending, creating it if needed.
    pub fn open_log_file(&mut self, path: &Path) -> Result<(), LogError> {
        let file: File = OpenOptions::new().create(true).append(true).open(path)?;
        tracing::debug!("Opened log file {}", path.display());
        self.replace_log(Some(LogTarget {
            path: Some(path.to_path_buf()),
            writer: Box::new(LineWriter::new(file)),
        }))
    }

    /// Attaches an already open writer as the log, closing any previous one.
    pub fn set_log_writer(&mut self, writer: Box<dyn Write>) -> Result<(), LogError> {
        self.replace_log(Some(LogTarget { path: None, writer }))
    }

    // The current target stays installed if its final flush fails.
    fn replace_log(&mut self, next: Option<LogTarget>) -> Result<(), LogError> {
        if let Some(current) = self.log.as_mut() {
            current.writer.flush()?;
        }
        let previous = std::mem::replace(&mut self.log, next);
        if let Some(path) = previous.as_ref().and_then(|t| t.path.as_ref()) {
            tracing::debug!("Closed log file {}", path.display());
        }
        Ok(())
    }

    pub fn has_log(&self) -> bool {
        self.log.is_some()
    }

    pub fn log_path(&self) -> Option<&Path> {
        self.log.as_ref().and_then(|t| t.path.as_deref())
    }

    /// Writes `file_line` to the log (if any) and `console_line` to the
    /// console when `mode` lets `level` through.
    pub fn write(
        &mut self,
        level: Level,
        file_line: &str,
        console_line: &str,
        depth: usize,
        mode: ConsoleMode,
    ) -> Result<(), LogError> {
        if let Some(target) = self.log.as_mut() {
            writeln!(target.writer, "{}", file_line)?;
        }
        if mode.shows(level) {
            self.write_console(&format!("{}{}", mode.indentation(depth), console_line))?;
        }
        Ok(())
    }

    /// Writes a raw line to the console only.
    pub fn write_console(&mut self, line: &str) -> Result<(), LogError> {
        writeln!(self.console, "{}", line)?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<(), LogError> {
        self.console.flush()?;
        if let Some(target) = self.log.as_mut() {
            target.writer.flush()?;
        }
        Ok(())
    }

    /// Flushes and releases the log writer. Later calls are no-ops.
    pub fn close(&mut self) -> Result<(), LogError> {
        self.console.flush()?;
        self.replace_log(None)
    }
}

impl Drop for Sink {
    fn drop(&mut self) {
        if let Err(e) = self.close() {
            tracing::warn!("Failed to close log output: {}", e);
        }
    }
}

/// In-memory writer whose contents stay readable after it is handed to a
/// [`Sink`]. Clones share the same buffer.
#[derive(Debug, Clone, Default)]
pub struct CaptureBuffer {
    bytes: Rc<RefCell<Vec<u8>>>,
}

impl CaptureBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.bytes.borrow()).into_owned()
    }

    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_string).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.borrow().is_empty()
    }
}

impl Write for CaptureBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.bytes.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_console_mode_policy() {
        let normal = ConsoleMode::default();
        assert!(normal.shows(Level::Dbg));

        let quiet = ConsoleMode { log_only: true, force_out: false, indent: false };
        assert!(!quiet.shows(Level::Out));

        let forced = ConsoleMode { log_only: true, force_out: true, indent: false };
        assert!(forced.shows(Level::Out));
        assert!(forced.shows(Level::Any));
        assert!(!forced.shows(Level::Err));
    }

    #[test]
    fn test_file_always_written_console_honors_mode() {
        let console = CaptureBuffer::new();
        let log = CaptureBuffer::new();
        let mut sink = Sink::with_console(Box::new(console.clone()));
        sink.set_log_writer(Box::new(log.clone())).unwrap();

        let quiet = ConsoleMode { log_only: true, force_out: true, indent: false };
        sink.write(Level::Err, "[x:f():1] e", "e", 0, quiet).unwrap();
        sink.write(Level::Out, "[x:f():2] o", "o", 0, quiet).unwrap();

        assert_eq!(log.lines(), vec!["[x:f():1] e", "[x:f():2] o"]);
        assert_eq!(console.lines(), vec!["o"]);
    }

    #[test]
    fn test_indentation_only_when_tracing() {
        let console = CaptureBuffer::new();
        let mut sink = Sink::with_console(Box::new(console.clone()));
        let traced = ConsoleMode { indent: true, ..ConsoleMode::default() };
        sink.write(Level::Dbg, "a", "a", 2, traced).unwrap();
        sink.write(Level::Dbg, "b", "b", 2, ConsoleMode::default()).unwrap();
        assert_eq!(console.lines(), vec!["    a", "b"]);
    }

    #[test]
    fn test_log_file_appends_and_closes_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.log");
        std::fs::write(&path, "existing\n").unwrap();

        let mut sink = Sink::with_console(Box::new(CaptureBuffer::new()));
        sink.open_log_file(&path).unwrap();
        assert_eq!(sink.log_path(), Some(path.as_path()));
        sink.write(Level::Err, "new", "new", 0, ConsoleMode::default()).unwrap();
        sink.close().unwrap();
        assert!(!sink.has_log());
        sink.close().unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "existing\nnew\n");
    }

    struct FailingFlush(CaptureBuffer);

    impl Write for FailingFlush {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.write(buf)
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::Other, "device gone"))
        }
    }

    #[test]
    fn test_failed_flush_keeps_current_log() {
        let current = CaptureBuffer::new();
        let next = CaptureBuffer::new();
        let mut sink = Sink::with_console(Box::new(CaptureBuffer::new()));
        sink.set_log_writer(Box::new(FailingFlush(current.clone()))).unwrap();

        let err = sink.set_log_writer(Box::new(next.clone())).unwrap_err();
        assert!(matches!(err, LogError::Io(_)));
        assert!(sink.has_log());

        sink.write(Level::Err, "still here", "still here", 0, ConsoleMode::default()).unwrap();
        assert_eq!(current.lines(), vec!["still here"]);
        assert!(next.is_empty());
    }

    #[test]
    fn test_open_failure_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = Sink::with_console(Box::new(CaptureBuffer::new()));
        let err = sink.open_log_file(&dir.path().join("missing").join("app.log")).unwrap_err();
        assert!(matches!(err, LogError::Io(_)));
    }
}
