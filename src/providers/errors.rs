// 3rd party crates
use thiserror::Error;

// Project imports
use crate::utility::credentials::CredentialsError;
use crate::utility::xmlrpc::XmlRpcError;

/// Errors surfaced by authenticator plugins to the host.
#[derive(Debug, Error)]
pub enum PluginError {
    #[error("Failed to add TXT Record")]
    AddRecordFailed,

    #[error("Failed to remove TXT Record")]
    RemoveRecordFailed,

    #[error("Validation name '{validation_name}' does not end with '.{zone}'")]
    ZoneMismatch {
        validation_name: String,
        zone: String,
    },

    #[error(transparent)]
    Transport(#[from] XmlRpcError),

    #[error(transparent)]
    Credentials(#[from] CredentialsError),

    #[error("Missing credentials file path; pass --{0}-credentials")]
    MissingCredentials(String),

    #[error("Unknown authenticator plugin '{0}'")]
    UnknownPlugin(String),
}
