// Standard library
use std::path::PathBuf;

// 3rd party crates
use serde::Deserialize;

// Project imports
use crate::providers::constants::DEFAULT_PROPAGATION_SECONDS;

// Current module imports
use super::constants::{DEFAULT_AUTHENTICATOR, DEFAULT_LOG_LEVEL};

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct Log {
    #[serde(default = "default_log_level")]
    pub level: String,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct Authenticator {
    #[serde(default = "default_authenticator")]
    pub name: String,

    #[serde(default)]
    pub credentials: Option<PathBuf>,

    #[serde(default = "default_propagation_seconds")]
    pub propagation_seconds: u64,
}

#[derive(Debug, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    #[serde(default)]
    pub log: Log,

    #[serde(default)]
    pub authenticator: Authenticator,
}

/// Values given on the command line. They win over the file and environment.
#[derive(Debug, Clone, Default)]
pub struct SettingsOverrides {
    pub authenticator: Option<String>,
    pub credentials: Option<PathBuf>,
    pub propagation_seconds: Option<u64>,
}

/// Settings that passed [`Settings::validate`].
#[derive(Debug, Clone)]
pub struct ValidatedSettings(pub(super) Settings);

/// Locates, creates and loads the configuration file.
#[derive(Debug)]
pub struct ConfigManager {
    pub settings: Settings,
    pub config_path: PathBuf,
}

impl Default for Log {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Default for Authenticator {
    fn default() -> Self {
        Self {
            name: default_authenticator(),
            credentials: None,
            propagation_seconds: default_propagation_seconds(),
        }
    }
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

fn default_authenticator() -> String {
    DEFAULT_AUTHENTICATOR.to_string()
}

fn default_propagation_seconds() -> u64 {
    DEFAULT_PROPAGATION_SECONDS
}
