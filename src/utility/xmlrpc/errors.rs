// 3rd party crates
use thiserror::Error;

/// Errors raised while talking XML-RPC, from the HTTP layer up to document decoding.
#[derive(Debug, Error)]
pub enum XmlRpcError {
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("XML-RPC endpoint '{endpoint}' answered HTTP {status}: {body}")]
    HttpStatus {
        endpoint: String,
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("Malformed XML-RPC document: {0}")]
    Malformed(String),

    #[error("Unsupported XML-RPC value type '{0}'")]
    UnsupportedType(String),

    #[error("Invalid {kind} value '{value}'")]
    InvalidScalar { kind: &'static str, value: String },
}
