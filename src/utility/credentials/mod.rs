//! INI credentials files.
//!
//! Files hold plain `key = value` lines with keys namespaced by plugin, e.g.
//!
//! ```ini
//! dns_loopia_endpoint = https://api.loopia.se/RPCSERV
//! dns_loopia_username = user@loopiaapi
//! dns_loopia_apikey = secret
//! ```

pub mod errors;
pub mod impls;
pub mod types;

pub use errors::CredentialsError;
pub use impls::namespace_for;
pub use types::{CredentialsConfiguration, RequiredVariable};
