// Standard library
use std::path::PathBuf;

// 3rd party crates
use serde::Deserialize;

// Project imports
use crate::utility::domain::validation_domain_name;

use super::constants::DEFAULT_PROPAGATION_SECONDS;

/// One dns-01 challenge as handed over by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChallengeRequest {
    /// Domain being validated.
    pub domain: String,
    /// Fully qualified name of the `_acme-challenge` record.
    pub validation_name: String,
    /// TXT payload.
    pub validation: String,
}

impl ChallengeRequest {
    /// Builds a challenge for `domain`, deriving the validation name.
    pub fn new(domain: impl Into<String>, validation: impl Into<String>) -> Self {
        let domain: String = domain.into();
        Self {
            validation_name: validation_domain_name(&domain),
            domain,
            validation: validation.into(),
        }
    }
}

/// Settings shared by DNS authenticator plugins.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct AuthenticatorConfig {
    /// Path of the plugin's INI credentials file.
    #[serde(default)]
    pub credentials: Option<PathBuf>,

    /// Seconds to wait for DNS changes to propagate before validation.
    #[serde(default = "default_propagation_seconds")]
    pub propagation_seconds: u64,
}

impl Default for AuthenticatorConfig {
    fn default() -> Self {
        Self {
            credentials: None,
            propagation_seconds: default_propagation_seconds(),
        }
    }
}

fn default_propagation_seconds() -> u64 {
    DEFAULT_PROPAGATION_SECONDS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_challenge_request_new() {
        let challenge = ChallengeRequest::new("example.com", "abc123");

        assert_eq!(challenge.domain, "example.com");
        assert_eq!(challenge.validation_name, "_acme-challenge.example.com");
        assert_eq!(challenge.validation, "abc123");
    }

    #[test]
    fn test_authenticator_config_default() {
        let config = AuthenticatorConfig::default();

        assert_eq!(config.credentials, None);
        assert_eq!(config.propagation_seconds, 120);
    }
}
