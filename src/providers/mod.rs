pub mod constants;
pub mod errors;
pub mod loopia;
pub mod registry;
pub mod traits;
pub mod types;

pub use errors::PluginError;
pub use registry::{create_authenticator, find_plugin, PluginEntry, PLUGINS};
pub use traits::DnsAuthenticator;
pub use types::{AuthenticatorConfig, ChallengeRequest};
