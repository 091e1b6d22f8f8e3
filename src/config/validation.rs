//! Settings validation

use super::{LoggerSettings, SinkConfig, SinkKind};
use crate::error::ConfigError;

/// Validate complete logger settings
pub fn validate_settings(settings: &LoggerSettings) -> Result<(), ConfigError> {
    validate_sink(&settings.stdout)?;
    if let Some(stderr) = &settings.stderr {
        validate_sink(stderr)?;
    }
    Ok(())
}

/// Validate one sink entry
fn validate_sink(sink: &SinkConfig) -> Result<(), ConfigError> {
    match sink.kind {
        SinkKind::File => match sink.path.as_deref() {
            Some(path) if !path.trim().is_empty() => Ok(()),
            _ => Err(ConfigError::InvalidSink(
                "file sinks require a non-empty path".to_string(),
            )),
        },
        _ => {
            if sink.path.is_some() {
                return Err(ConfigError::InvalidSink(format!(
                    "a path only makes sense for file sinks, not {:?}",
                    sink.kind
                )));
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings_validate() {
        assert!(validate_settings(&LoggerSettings::default()).is_ok());
    }

    #[test]
    fn blank_file_paths_are_rejected() {
        let settings = LoggerSettings {
            stdout: SinkConfig {
                kind: SinkKind::File,
                path: Some("   ".to_string()),
            },
            ..Default::default()
        };
        let err = validate_settings(&settings).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidSink(_)));
    }

    #[test]
    fn stray_paths_on_stream_sinks_are_rejected() {
        let settings = LoggerSettings {
            stderr: Some(SinkConfig {
                kind: SinkKind::Stderr,
                path: Some("/tmp/ignored.log".to_string()),
            }),
            ..Default::default()
        };
        let err = validate_settings(&settings).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidSink(_)));
    }
}
