//! Console-style leveled logger with pluggable formatting and sinks
//!
//! The logger exposes the six console methods (`error`, `warn`, `info`,
//! `log`, `table`, `dir`). Every call runs the same pipeline: the formatter
//! is invoked exactly once with the level and the caller's arguments, a
//! `None` result suppresses the write, otherwise the optional
//! `before_write` hook runs, the line goes to the level's sink with a
//! trailing newline, and the optional `after_write` hook runs.
//!
//! `error` and `warn` route to the error sink; the other four route to the
//! primary sink. When no error sink is configured both routes share the
//! primary sink.

pub mod format;
pub mod sink;

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::ConfigError;

pub use format::FormatFn;
pub use sink::{BufferSink, FileSink, NullSink, Sink, SinkSpec, StderrSink, StdoutSink};

/// Logging levels, one per logger method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Error,
    Warn,
    Info,
    Log,
    Table,
    Dir,
}

impl Level {
    /// Levels routed to the error sink
    fn routes_to_error_sink(self) -> bool {
        matches!(self, Level::Error | Level::Warn)
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Level::Error => "error",
            Level::Warn => "warn",
            Level::Info => "info",
            Level::Log => "log",
            Level::Table => "table",
            Level::Dir => "dir",
        };
        f.write_str(name)
    }
}

/// Hook invoked around sink writes
pub type WriteHook = Box<dyn Fn() + Send + Sync>;

/// Options for building a [`Logger`]
pub struct LoggerOptions {
    pub stdout: SinkSpec,
    pub stderr: Option<SinkSpec>,
    pub formatter: Option<Box<FormatFn>>,
    pub before_write: Option<WriteHook>,
    pub after_write: Option<WriteHook>,
}

impl fmt::Debug for LoggerOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoggerOptions").finish_non_exhaustive()
    }
}

impl LoggerOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the primary sink
    pub fn with_stdout(mut self, spec: SinkSpec) -> Self {
        self.stdout = spec;
        self
    }

    /// Route `error` and `warn` to a dedicated sink
    pub fn with_stderr(mut self, spec: SinkSpec) -> Self {
        self.stderr = Some(spec);
        self
    }

    /// Replace the formatter. Returning `None` suppresses the write and the
    /// hooks for that call.
    pub fn with_formatter<F>(mut self, formatter: F) -> Self
    where
        F: for<'a> Fn(Level, fmt::Arguments<'a>) -> Option<String> + Send + Sync + 'static,
    {
        self.formatter = Some(Box::new(formatter));
        self
    }

    /// Hook to run just before each sink write
    pub fn with_before_write<F>(mut self, hook: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.before_write = Some(Box::new(hook));
        self
    }

    /// Hook to run just after each sink write
    pub fn with_after_write<F>(mut self, hook: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.after_write = Some(Box::new(hook));
        self
    }
}

impl Default for LoggerOptions {
    fn default() -> Self {
        Self {
            stdout: SinkSpec::Stdout,
            stderr: None,
            formatter: None,
            before_write: None,
            after_write: None,
        }
    }
}

struct LoggerInner {
    stdout: Arc<dyn Sink>,
    stderr: Arc<dyn Sink>,
    formatter: Box<FormatFn>,
    before_write: Option<WriteHook>,
    after_write: Option<WriteHook>,
}

/// Console-compatible logger. Clones are cheap and share sinks, formatter
/// and hooks.
#[derive(Clone)]
pub struct Logger {
    inner: Arc<LoggerInner>,
}

impl Logger {
    /// Build a logger, resolving the sink specs now. File sinks that cannot
    /// be opened fail here, not at the first write.
    pub fn new(options: LoggerOptions) -> Result<Self, ConfigError> {
        let stdout = options.stdout.resolve()?;
        let stderr = match options.stderr {
            Some(spec) => spec.resolve()?,
            None => Arc::clone(&stdout),
        };
        let formatter = options
            .formatter
            .unwrap_or_else(|| Box::new(format::plain_format));
        Ok(Self {
            inner: Arc::new(LoggerInner {
                stdout,
                stderr,
                formatter,
                before_write: options.before_write,
                after_write: options.after_write,
            }),
        })
    }

    pub fn error(&self, args: fmt::Arguments<'_>) {
        self.dispatch(Level::Error, args);
    }

    pub fn warn(&self, args: fmt::Arguments<'_>) {
        self.dispatch(Level::Warn, args);
    }

    pub fn info(&self, args: fmt::Arguments<'_>) {
        self.dispatch(Level::Info, args);
    }

    pub fn log(&self, args: fmt::Arguments<'_>) {
        self.dispatch(Level::Log, args);
    }

    pub fn table(&self, args: fmt::Arguments<'_>) {
        self.dispatch(Level::Table, args);
    }

    pub fn dir(&self, args: fmt::Arguments<'_>) {
        self.dispatch(Level::Dir, args);
    }

    fn dispatch(&self, level: Level, args: fmt::Arguments<'_>) {
        let line = match (self.inner.formatter)(level, args) {
            Some(line) => line,
            None => return,
        };
        if let Some(hook) = &self.inner.before_write {
            hook();
        }
        let sink = if level.routes_to_error_sink() {
            &self.inner.stderr
        } else {
            &self.inner.stdout
        };
        if let Err(err) = sink.write_line(&line) {
            warn!(%level, error = %err, "log sink write failed");
        }
        if let Some(hook) = &self.inner.after_write {
            hook();
        }
    }
}
