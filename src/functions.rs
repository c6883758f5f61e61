// Standard library
use std::time::Duration;

// 3rd party crates
use tracing::{error, info};

// Project imports
use crate::errors::UsageError;
use crate::providers::{ChallengeRequest, DnsAuthenticator, PluginError, PLUGINS};

/// Pairs each domain with the validation token at the same position.
///
/// No tokens at all is accepted and yields empty ones, which `cleanup` relies
/// on; any other count mismatch is a usage error.
pub fn pair_challenges(
    domains: &[String],
    validations: &[String],
) -> Result<Vec<ChallengeRequest>, UsageError> {
    if validations.is_empty() {
        return Ok(domains
            .iter()
            .map(|domain| ChallengeRequest::new(domain.as_str(), ""))
            .collect());
    }

    if validations.len() != domains.len() {
        return Err(UsageError::ValidationCountMismatch {
            domains: domains.len(),
            validations: validations.len(),
        });
    }

    Ok(domains
        .iter()
        .zip(validations)
        .map(|(domain, validation)| ChallengeRequest::new(domain.as_str(), validation.as_str()))
        .collect())
}

/// Publishes every challenge record, then waits for DNS propagation.
///
/// Challenges are handled in order and the first failure stops the run. The
/// propagation wait happens once, after the last record.
pub async fn run_auth(
    authenticator: &dyn DnsAuthenticator,
    challenges: &[ChallengeRequest],
) -> Result<(), PluginError> {
    for challenge in challenges {
        info!(
            plugin = authenticator.name(),
            domain = %challenge.domain,
            "Performing dns-01 challenge"
        );
        authenticator.perform(challenge).await?;
    }

    let propagation_seconds: u64 = authenticator.propagation_seconds();
    if propagation_seconds > 0 {
        info!(
            "🕰️ Waiting {} seconds for DNS changes to propagate",
            propagation_seconds
        );
        tokio::time::sleep(Duration::from_secs(propagation_seconds)).await;
    }

    Ok(())
}

/// Removes the records of every challenge.
///
/// A failed cleanup does not stop the others; the last error is returned.
pub async fn run_cleanup(
    authenticator: &dyn DnsAuthenticator,
    challenges: &[ChallengeRequest],
) -> Result<(), PluginError> {
    let mut last_error: Option<PluginError> = None;

    for challenge in challenges {
        info!(
            plugin = authenticator.name(),
            domain = %challenge.domain,
            "Cleaning up dns-01 challenge"
        );
        if let Err(e) = authenticator.cleanup(challenge).await {
            error!(domain = %challenge.domain, "Cleanup failed: {}", e);
            last_error = Some(e);
        }
    }

    match last_error {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

/// `name: description` per registered plugin, followed by its indented help text.
pub fn plugin_listing() -> Vec<String> {
    PLUGINS
        .iter()
        .map(|entry| format!("{}: {}\n    {}", entry.name, entry.description, entry.more_info))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Authenticator that records calls and fails for chosen domains.
    #[derive(Default)]
    struct MockAuthenticator {
        failing: Vec<String>,
        performed: Mutex<Vec<String>>,
        cleaned: Mutex<Vec<String>>,
    }

    impl MockAuthenticator {
        fn failing_for(domains: &[&str]) -> Self {
            Self {
                failing: domains.iter().map(|d| d.to_string()).collect(),
                ..Default::default()
            }
        }
    }

    #[async_trait]
    impl DnsAuthenticator for MockAuthenticator {
        fn name(&self) -> &'static str {
            "dns-mock"
        }

        fn description(&self) -> &'static str {
            "Mock"
        }

        fn more_info(&self) -> String {
            String::new()
        }

        fn propagation_seconds(&self) -> u64 {
            0
        }

        async fn perform(&self, challenge: &ChallengeRequest) -> Result<(), PluginError> {
            self.performed.lock().unwrap().push(challenge.domain.clone());
            if self.failing.contains(&challenge.domain) {
                return Err(PluginError::AddRecordFailed);
            }
            Ok(())
        }

        async fn cleanup(&self, challenge: &ChallengeRequest) -> Result<(), PluginError> {
            self.cleaned.lock().unwrap().push(challenge.domain.clone());
            if self.failing.contains(&challenge.domain) {
                return Err(PluginError::RemoveRecordFailed);
            }
            Ok(())
        }
    }

    fn challenges(domains: &[&str]) -> Vec<ChallengeRequest> {
        domains
            .iter()
            .map(|domain| ChallengeRequest::new(*domain, "token"))
            .collect()
    }

    #[tokio::test]
    async fn test_run_auth_performs_all() {
        let authenticator = MockAuthenticator::default();

        run_auth(&authenticator, &challenges(&["a.example.com", "example.com"]))
            .await
            .unwrap();

        assert_eq!(
            *authenticator.performed.lock().unwrap(),
            vec!["a.example.com", "example.com"]
        );
    }

    #[tokio::test]
    async fn test_run_auth_stops_at_first_error() {
        let authenticator = MockAuthenticator::failing_for(&["b.example.com"]);

        let err = run_auth(
            &authenticator,
            &challenges(&["a.example.com", "b.example.com", "c.example.com"]),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, PluginError::AddRecordFailed));
        assert_eq!(
            *authenticator.performed.lock().unwrap(),
            vec!["a.example.com", "b.example.com"]
        );
    }

    #[tokio::test]
    async fn test_run_cleanup_attempts_all() {
        let authenticator = MockAuthenticator::failing_for(&["a.example.com"]);

        let err = run_cleanup(
            &authenticator,
            &challenges(&["a.example.com", "b.example.com"]),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, PluginError::RemoveRecordFailed));
        assert_eq!(
            *authenticator.cleaned.lock().unwrap(),
            vec!["a.example.com", "b.example.com"]
        );
    }

    #[tokio::test]
    async fn test_run_cleanup_ok() {
        let authenticator = MockAuthenticator::default();

        run_cleanup(&authenticator, &challenges(&["example.com"]))
            .await
            .unwrap();

        assert_eq!(authenticator.cleaned.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_plugin_listing() {
        let listing = plugin_listing();
        assert_eq!(listing.len(), 1);
        assert!(listing[0].starts_with("dns-loopia: "));
        assert!(listing[0].contains("\n    This plugin configures a DNS TXT record"));
    }

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    #[test]
    fn test_pair_challenges_by_position() {
        let challenges = pair_challenges(
            &strings(&["a.example.com", "example.com"]),
            &strings(&["token-a", "token-root"]),
        )
        .unwrap();

        assert_eq!(
            challenges,
            vec![
                ChallengeRequest::new("a.example.com", "token-a"),
                ChallengeRequest::new("example.com", "token-root"),
            ]
        );
        assert_eq!(challenges[0].validation_name, "_acme-challenge.a.example.com");
    }

    #[test]
    fn test_pair_challenges_without_validations() {
        let challenges =
            pair_challenges(&strings(&["example.com", "www.example.com"]), &[]).unwrap();

        assert_eq!(challenges.len(), 2);
        assert!(challenges.iter().all(|challenge| challenge.validation.is_empty()));
        assert_eq!(challenges[1].validation_name, "_acme-challenge.www.example.com");
    }

    #[test]
    fn test_pair_challenges_count_mismatch() {
        let err = pair_challenges(
            &strings(&["a.example.com", "b.example.com"]),
            &strings(&["token-a"]),
        )
        .unwrap_err();

        assert_eq!(
            err,
            UsageError::ValidationCountMismatch {
                domains: 2,
                validations: 1,
            }
        );
        assert_eq!(
            err.to_string(),
            "got 2 --domain values but 1 --validation values"
        );

        assert!(pair_challenges(&strings(&["example.com"]), &strings(&["a", "b"])).is_err());
    }
}
