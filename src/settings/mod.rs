//! Application settings.
//!
//! Read from a TOML file (created with defaults on first run), then from
//! `LOOPIA_DNS__<SECTION>__<KEY>` environment variables, then from command line
//! overrides.

pub mod constants;
pub mod errors;
pub mod impls;
pub mod types;

pub use errors::{SettingsError, ValidationError};
pub use types::{ConfigManager, Settings, SettingsOverrides};
