// Standard library
use std::path::PathBuf;

// 3rd party crates
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CredentialsError {
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to read credentials file '{}': {source}", .path.display())]
    Unreadable {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Error parsing credentials configuration '{}': {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: ini::ParseError,
    },

    #[error(
        "Missing property in credentials configuration file {}:\n * Property \"{key}\" not found (should be {description}).",
        .path.display()
    )]
    MissingProperty {
        path: PathBuf,
        key: String,
        description: String,
    },
}
