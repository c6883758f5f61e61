// Standard library
use std::path::PathBuf;

// 3rd party crates
use config::ConfigError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Invalid log level: {0}. Must be one of: error, warn, info, debug, trace")]
    InvalidLogLevel(String),
    #[error("Authenticator name must not be empty")]
    EmptyAuthenticator,
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Could not determine the configuration directory")]
    NoConfigDir,
    #[error("Failed to create default configuration file {path}: {source}")]
    CreateDefault {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Configuration validation failed: {0}")]
    Validation(#[from] ValidationError),
}
