//! Settings loader with environment variable support

use config::{Environment, File};
use std::path::Path;

use super::validation::validate_settings;
use super::LoggerSettings;
use crate::error::ConfigError;

/// Load logger settings from a TOML file
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<LoggerSettings, ConfigError> {
    let config = config::Config::builder()
        .add_source(File::from(path.as_ref()))
        .build()?;

    let settings: LoggerSettings = config.try_deserialize()?;
    validate_settings(&settings)?;
    Ok(settings)
}

/// Load logger settings from a TOML file with `TAPLINE__`-prefixed
/// environment overrides, e.g. `TAPLINE__STDOUT__KIND=null`. Environment
/// values win over file values.
pub fn load_settings_with_env<P: AsRef<Path>>(path: P) -> Result<LoggerSettings, ConfigError> {
    let config = config::Config::builder()
        .add_source(File::from(path.as_ref()))
        .add_source(
            Environment::with_prefix("TAPLINE")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let settings: LoggerSettings = config.try_deserialize()?;
    validate_settings(&settings)?;
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{FormatConfig, SinkKind};
    use uuid::Uuid;

    fn write_temp_settings(contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("tapline-settings-{}.toml", Uuid::new_v4()));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn settings_load_from_a_toml_file() {
        let path = write_temp_settings(
            "format = \"json\"\n\n[stderr]\nkind = \"stderr\"\n",
        );
        let settings = load_settings(&path).unwrap();
        assert_eq!(settings.format, FormatConfig::Json);
        assert_eq!(settings.stdout.kind, SinkKind::Stdout);
        assert_eq!(settings.stderr.unwrap().kind, SinkKind::Stderr);
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn invalid_settings_fail_validation_at_load() {
        let path = write_temp_settings("[stdout]\nkind = \"file\"\n");
        let err = load_settings(&path).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidSink(_)));
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn environment_values_win_over_file_values() {
        let path = write_temp_settings("format = \"json\"\n\n[stdout]\nkind = \"stderr\"\n");
        std::env::set_var("TAPLINE__STDOUT__KIND", "null");
        let settings = load_settings_with_env(&path);
        std::env::remove_var("TAPLINE__STDOUT__KIND");

        let settings = settings.unwrap();
        assert_eq!(settings.stdout.kind, SinkKind::Null);
        // untouched keys still come from the file
        assert_eq!(settings.format, FormatConfig::Json);
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn missing_files_surface_as_load_errors() {
        let err = load_settings("/tapline-no-such-dir/settings.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Load(_)));
    }
}
