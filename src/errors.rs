// 3rd party crates
use thiserror::Error;

/// Command line input the host cannot turn into challenges.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum UsageError {
    #[error("got {domains} --domain values but {validations} --validation values")]
    ValidationCountMismatch { domains: usize, validations: usize },
}
