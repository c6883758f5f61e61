// Project imports
use crate::providers::loopia::constants::{
    DESCRIPTION as LOOPIA_DESCRIPTION, MORE_INFO as LOOPIA_MORE_INFO,
    PLUGIN_NAME as LOOPIA_NAME,
};
use crate::providers::loopia::LoopiaAuthenticator;

// Current module imports
use super::errors::PluginError;
use super::traits::DnsAuthenticator;
use super::types::AuthenticatorConfig;

/// Builds an authenticator from its configuration.
pub type AuthenticatorFactory =
    fn(&AuthenticatorConfig) -> Result<Box<dyn DnsAuthenticator>, PluginError>;

/// A registered authenticator plugin.
#[derive(Clone, Copy)]
pub struct PluginEntry {
    pub name: &'static str,
    pub description: &'static str,
    /// Longer help text, the same as [`DnsAuthenticator::more_info`].
    pub more_info: &'static str,
    pub factory: AuthenticatorFactory,
}

/// Every authenticator this binary can run.
pub static PLUGINS: &[PluginEntry] = &[PluginEntry {
    name: LOOPIA_NAME,
    description: LOOPIA_DESCRIPTION,
    more_info: LOOPIA_MORE_INFO,
    factory: loopia_factory,
}];

fn loopia_factory(config: &AuthenticatorConfig) -> Result<Box<dyn DnsAuthenticator>, PluginError> {
    Ok(Box::new(LoopiaAuthenticator::new(config.clone())?))
}

pub fn find_plugin(name: &str) -> Option<&'static PluginEntry> {
    PLUGINS.iter().find(|entry| entry.name == name)
}

/// Looks up `name` and constructs its authenticator.
pub fn create_authenticator(
    name: &str,
    config: &AuthenticatorConfig,
) -> Result<Box<dyn DnsAuthenticator>, PluginError> {
    let entry: &PluginEntry =
        find_plugin(name).ok_or_else(|| PluginError::UnknownPlugin(name.to_string()))?;
    (entry.factory)(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_find_plugin() {
        let entry = find_plugin("dns-loopia").unwrap();
        assert_eq!(entry.name, "dns-loopia");
        assert!(entry.description.contains("Loopia"));
        assert!(find_plugin("dns-cloudflare").is_none());
    }

    #[test]
    fn test_create_unknown_plugin() {
        let err = create_authenticator("dns-nope", &AuthenticatorConfig::default()).err().unwrap();
        assert!(matches!(err, PluginError::UnknownPlugin(ref name) if name == "dns-nope"));
    }

    #[test]
    fn test_create_loopia_without_credentials() {
        let err = create_authenticator("dns-loopia", &AuthenticatorConfig::default()).err().unwrap();
        assert!(matches!(err, PluginError::MissingCredentials(_)));
    }

    #[test]
    fn test_create_loopia() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            "dns_loopia_endpoint = https://api.loopia.se/RPCSERV\n\
             dns_loopia_username = user@loopiaapi\n\
             dns_loopia_apikey = secret\n"
        )
        .unwrap();

        let config = AuthenticatorConfig {
            credentials: Some(file.path().to_path_buf()),
            propagation_seconds: 10,
        };
        let authenticator = create_authenticator("dns-loopia", &config).unwrap();

        let entry = find_plugin("dns-loopia").unwrap();
        assert_eq!(authenticator.name(), entry.name);
        assert_eq!(authenticator.description(), entry.description);
        assert_eq!(authenticator.more_info(), entry.more_info);
        assert_eq!(authenticator.propagation_seconds(), 10);
    }
}
