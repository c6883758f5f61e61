// 3rd party crates
use async_trait::async_trait;

// Current module imports
use super::errors::PluginError;
use super::types::ChallengeRequest;

/// Core trait that all DNS authenticator plugins must implement.
/// An authenticator answers dns-01 challenges by publishing the validation
/// token as a TXT record and removing it once the ACME server has checked it.
///
/// # Implementation Requirements
///
/// Implementors must provide:
/// - Naming and help text for plugin discovery
/// - The propagation delay the host waits after `perform`
/// - Methods to publish and remove the challenge record
///
/// # Example Implementation
///
/// ```rust
/// # use async_trait::async_trait;
/// # use loopia_dns::providers::{AuthenticatorConfig, ChallengeRequest, DnsAuthenticator, PluginError};
/// struct EchoAuthenticator {
///     config: AuthenticatorConfig,
/// }
///
/// #[async_trait]
/// impl DnsAuthenticator for EchoAuthenticator {
///     fn name(&self) -> &'static str {
///         "dns-echo"
///     }
///
///     fn description(&self) -> &'static str {
///         "Print challenge records instead of publishing them."
///     }
///
///     fn more_info(&self) -> String {
///         "Debugging aid.".to_string()
///     }
///
///     fn propagation_seconds(&self) -> u64 {
///         self.config.propagation_seconds
///     }
///
///     async fn perform(&self, challenge: &ChallengeRequest) -> Result<(), PluginError> {
///         println!("{} TXT {}", challenge.validation_name, challenge.validation);
///         Ok(())
///     }
///
///     async fn cleanup(&self, challenge: &ChallengeRequest) -> Result<(), PluginError> {
///         println!("remove {}", challenge.validation_name);
///         Ok(())
///     }
/// }
/// ```
///
/// Construction is left to each plugin; the registry in
/// [`crate::providers::registry`] maps plugin names to factory functions.
#[async_trait]
pub trait DnsAuthenticator: Send + Sync {
    /// Plugin name used for discovery and CLI flag prefixes, e.g. `dns-loopia`.
    fn name(&self) -> &'static str;

    /// One-line description shown when listing plugins.
    fn description(&self) -> &'static str;

    /// Longer help text.
    fn more_info(&self) -> String;

    /// Seconds the host waits after `perform` before asking for validation.
    fn propagation_seconds(&self) -> u64;

    /// Publishes the TXT record for `challenge`.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - The provider accepted the record
    /// * `Err(PluginError)` - The record could not be created
    async fn perform(&self, challenge: &ChallengeRequest) -> Result<(), PluginError>;

    /// Removes the TXT record published for `challenge`.
    ///
    /// The record is identified by `challenge.validation_name` alone; the
    /// validation token is not consulted.
    async fn cleanup(&self, challenge: &ChallengeRequest) -> Result<(), PluginError>;
}
