//! Declarative logger settings
//!
//! Settings choose sinks and a formatter preset by name; they are loaded
//! from a TOML file with optional environment overrides and mapped onto
//! [`LoggerOptions`] once validated.

pub mod loader;
pub mod validation;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::logger::{format, LoggerOptions, SinkSpec};

/// Sink kinds nameable in settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SinkKind {
    Stdout,
    Stderr,
    File,
    Null,
}

/// One sink in settings form
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SinkConfig {
    pub kind: SinkKind,
    #[serde(default)]
    pub path: Option<String>,
}

/// Formatter presets nameable in settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatConfig {
    Plain,
    Json,
}

/// Logger settings as read from files and the environment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggerSettings {
    #[serde(default = "default_stdout")]
    pub stdout: SinkConfig,
    #[serde(default)]
    pub stderr: Option<SinkConfig>,
    #[serde(default = "default_format")]
    pub format: FormatConfig,
}

impl Default for LoggerSettings {
    fn default() -> Self {
        Self {
            stdout: default_stdout(),
            stderr: None,
            format: default_format(),
        }
    }
}

impl LoggerSettings {
    /// Map the settings onto logger options
    pub fn into_options(self) -> Result<LoggerOptions, ConfigError> {
        let mut options = LoggerOptions::default().with_stdout(sink_spec(&self.stdout)?);
        if let Some(stderr) = &self.stderr {
            options = options.with_stderr(sink_spec(stderr)?);
        }
        options = match self.format {
            FormatConfig::Plain => options.with_formatter(format::plain_format),
            FormatConfig::Json => options.with_formatter(format::json_format),
        };
        Ok(options)
    }
}

fn sink_spec(sink: &SinkConfig) -> Result<SinkSpec, ConfigError> {
    Ok(match sink.kind {
        SinkKind::Stdout => SinkSpec::Stdout,
        SinkKind::Stderr => SinkSpec::Stderr,
        SinkKind::Null => SinkSpec::Null,
        SinkKind::File => {
            let path = sink.path.as_deref().ok_or_else(|| {
                ConfigError::InvalidSink("file sinks require a non-empty path".to_string())
            })?;
            SinkSpec::File(path.into())
        }
    })
}

fn default_stdout() -> SinkConfig {
    SinkConfig {
        kind: SinkKind::Stdout,
        path: None,
    }
}

fn default_format() -> FormatConfig {
    FormatConfig::Plain
}
