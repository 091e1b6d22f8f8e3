//! Error types for the logging and interception layers

use thiserror::Error;

/// Result type alias for tapline operations
pub type Result<T> = std::result::Result<T, TaplineError>;

/// Main error type for the crate
#[derive(Error, Debug)]
pub enum TaplineError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Spy error: {0}")]
    Spy(#[from] SpyError),

    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),

    #[error("Console error: {0}")]
    Console(#[from] ConsoleError),
}

/// Errors raised while building a logger or loading its settings
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Cannot open log sink {path}: {source}")]
    SinkOpen {
        path: String,
        source: std::io::Error,
    },

    #[error("Invalid sink settings: {0}")]
    InvalidSink(String),

    #[error("Settings error: {0}")]
    Load(String),
}

/// Errors raised while attaching a spy to a target
#[derive(Error, Debug)]
pub enum SpyError {
    #[error("Target has no method named \"{0}\"")]
    MethodNotFound(String),
}

/// Errors raised by the request gateway
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("No transport registered for scheme {0}")]
    SchemeNotRegistered(crate::http::Scheme),

    #[error("Invalid request arguments: {0}")]
    InvalidArgs(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Request could not be initiated: {0}")]
    Dispatch(String),
}

/// Errors raised while replacing the global console
#[derive(Error, Debug)]
pub enum ConsoleError {
    #[error("A global logger is already installed")]
    AlreadyInstalled,
}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::Load(err.to_string())
    }
}

impl From<log::SetLoggerError> for ConsoleError {
    fn from(_: log::SetLoggerError) -> Self {
        ConsoleError::AlreadyInstalled
    }
}
