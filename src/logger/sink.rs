//! Byte sinks for the logger
//!
//! Sinks are line oriented: `write_line` appends the trailing newline, so
//! one formatter result maps to exactly one line in the sink.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};

use crate::error::ConfigError;

/// A destination for formatted log lines
pub trait Sink: Send + Sync {
    /// Write one formatted line, appending the trailing newline
    fn write_line(&self, line: &str) -> io::Result<()>;
}

/// Sink writing to the process stdout
pub struct StdoutSink;

impl Sink for StdoutSink {
    fn write_line(&self, line: &str) -> io::Result<()> {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        handle.write_all(line.as_bytes())?;
        handle.write_all(b"\n")?;
        handle.flush()
    }
}

/// Sink writing to the process stderr
pub struct StderrSink;

impl Sink for StderrSink {
    fn write_line(&self, line: &str) -> io::Result<()> {
        let stderr = io::stderr();
        let mut handle = stderr.lock();
        handle.write_all(line.as_bytes())?;
        handle.write_all(b"\n")?;
        handle.flush()
    }
}

/// Append-mode file sink
#[derive(Debug)]
pub struct FileSink {
    file: Mutex<File>,
}

impl FileSink {
    /// Open (or create) the file at `path` for appending
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|source| ConfigError::SinkOpen {
                path: path.display().to_string(),
                source,
            })?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }
}

impl Sink for FileSink {
    fn write_line(&self, line: &str) -> io::Result<()> {
        let mut file = self.file.lock().unwrap_or_else(PoisonError::into_inner);
        file.write_all(line.as_bytes())?;
        file.write_all(b"\n")?;
        file.flush()
    }
}

/// In-memory capture sink. Clones share the same buffer, so a test can keep
/// one handle and give the other to a logger.
#[derive(Debug, Clone, Default)]
pub struct BufferSink {
    buffer: Arc<Mutex<String>>,
}

impl BufferSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, trailing newlines included
    pub fn contents(&self) -> String {
        self.buffer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Captured lines without their trailing newlines
    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_owned).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_empty()
    }

    pub fn clear(&self) {
        self.buffer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl Sink for BufferSink {
    fn write_line(&self, line: &str) -> io::Result<()> {
        let mut buffer = self.buffer.lock().unwrap_or_else(PoisonError::into_inner);
        buffer.push_str(line);
        buffer.push('\n');
        Ok(())
    }
}

/// Sink discarding everything written to it
pub struct NullSink;

impl Sink for NullSink {
    fn write_line(&self, _line: &str) -> io::Result<()> {
        Ok(())
    }
}

/// Declarative sink choice, resolved when the logger is built
#[derive(Clone)]
pub enum SinkSpec {
    Stdout,
    Stderr,
    File(PathBuf),
    Buffer(BufferSink),
    Custom(Arc<dyn Sink>),
    Null,
}

impl SinkSpec {
    /// Resolve to a concrete sink, opening files now rather than at the
    /// first write
    pub fn resolve(self) -> Result<Arc<dyn Sink>, ConfigError> {
        Ok(match self {
            SinkSpec::Stdout => Arc::new(StdoutSink),
            SinkSpec::Stderr => Arc::new(StderrSink),
            SinkSpec::File(path) => Arc::new(FileSink::open(path)?),
            SinkSpec::Buffer(buffer) => Arc::new(buffer),
            SinkSpec::Custom(sink) => sink,
            SinkSpec::Null => Arc::new(NullSink),
        })
    }
}

impl Default for SinkSpec {
    fn default() -> Self {
        SinkSpec::Stdout
    }
}
