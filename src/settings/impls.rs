// Standard library
use std::path::{Path, PathBuf};
use std::{env, fs};

// 3rd party crates
use config::{Config, Environment, File, FileFormat};
use tracing::{debug, error, info};

// Project imports
use crate::providers::types::AuthenticatorConfig;

// Current module imports
use super::constants::{
    CONFIG_DIR_NAME, CONFIG_FILE_NAME, CONFIG_PATH_ENV, DEFAULT_CONFIG, ENV_PREFIX, ENV_SEPARATOR,
};
use super::errors::{SettingsError, ValidationError};
use super::types::{ConfigManager, Settings, SettingsOverrides, ValidatedSettings};

impl Settings {
    pub fn get_log_level(&self) -> String {
        self.log.level.to_lowercase()
    }

    pub fn get_authenticator_name(&self) -> &str {
        &self.authenticator.name
    }

    /// Settings handed to the authenticator plugin.
    pub fn get_authenticator_config(&self) -> AuthenticatorConfig {
        AuthenticatorConfig {
            credentials: self.authenticator.credentials.clone(),
            propagation_seconds: self.authenticator.propagation_seconds,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        match self.log.level.to_lowercase().as_str() {
            "error" | "warn" | "info" | "debug" | "trace" => {}
            _ => return Err(ValidationError::InvalidLogLevel(self.log.level.clone())),
        }

        if self.authenticator.name.trim().is_empty() {
            return Err(ValidationError::EmptyAuthenticator);
        }

        Ok(())
    }
}

impl ConfigManager {
    /// Loads the configuration file, the `LOOPIA_DNS__*` environment and the
    /// command line overrides, in that order of precedence.
    ///
    /// A missing file is created from [`DEFAULT_CONFIG`].
    pub fn new(
        explicit_path: Option<&Path>,
        overrides: &SettingsOverrides,
    ) -> Result<Self, SettingsError> {
        let config_path: PathBuf = Self::get_config_path(explicit_path)?;
        Self::ensure_config_file_exists(&config_path)?;

        let environment: Environment = Environment::with_prefix(ENV_PREFIX).separator(ENV_SEPARATOR);
        let settings: Settings = Self::load_settings(&config_path, environment, overrides)?;

        let validated_settings = ValidatedSettings::new(settings).map_err(|e| {
            error!("Configuration validation failed: {}", e);
            e
        })?;

        Ok(ConfigManager {
            settings: validated_settings.into_inner(),
            config_path,
        })
    }

    /// Determines the configuration file path.
    fn get_config_path(explicit_path: Option<&Path>) -> Result<PathBuf, SettingsError> {
        if let Some(path) = explicit_path {
            Ok(path.to_path_buf())
        } else if let Ok(path) = env::var(CONFIG_PATH_ENV) {
            Ok(PathBuf::from(path))
        } else if let Some(config_dir) = dirs::config_dir() {
            Ok(config_dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
        } else {
            error!("Could not determine the configuration directory");
            Err(SettingsError::NoConfigDir)
        }
    }

    /// Ensures that the configuration file exists, creating it if necessary.
    fn ensure_config_file_exists(config_path: &Path) -> Result<(), SettingsError> {
        if config_path.exists() {
            return Ok(());
        }

        let create_error = |source: std::io::Error| {
            error!(path = %config_path.display(), "Failed to create default configuration file: {}", source);
            SettingsError::CreateDefault {
                path: config_path.to_path_buf(),
                source,
            }
        };

        if let Some(parent_dir) = config_path.parent() {
            fs::create_dir_all(parent_dir).map_err(create_error)?;
        }
        fs::write(config_path, DEFAULT_CONFIG).map_err(create_error)?;
        info!("Default configuration file created at: {:?}", config_path);

        Ok(())
    }

    /// Layers the file, the environment and the overrides into [`Settings`].
    fn load_settings(
        config_path: &Path,
        environment: Environment,
        overrides: &SettingsOverrides,
    ) -> Result<Settings, SettingsError> {
        let credentials: Option<String> = overrides
            .credentials
            .as_ref()
            .map(|path| path.to_string_lossy().into_owned());

        let settings: Config = Config::builder()
            .add_source(File::from(config_path.to_path_buf()).format(FileFormat::Toml))
            .add_source(environment)
            .set_override_option("authenticator.name", overrides.authenticator.clone())?
            .set_override_option("authenticator.credentials", credentials)?
            .set_override_option("authenticator.propagation_seconds", overrides.propagation_seconds)?
            .build()?;

        let settings: Settings = settings.try_deserialize()?;
        debug!(path = %config_path.display(), "Loaded settings");

        Ok(settings)
    }

    pub fn get_log_level(&self) -> String {
        self.settings.get_log_level()
    }
}

impl ValidatedSettings {
    pub fn new(settings: Settings) -> Result<Self, ValidationError> {
        settings.validate()?;
        Ok(ValidatedSettings(settings))
    }

    pub fn into_inner(self) -> Settings {
        self.0
    }
}

impl std::ops::Deref for ValidatedSettings {
    type Target = Settings;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
