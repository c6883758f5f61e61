// Standard library
use std::fmt;

// 3rd party crates
use tracing::Span;

// Project imports
use crate::providers::types::AuthenticatorConfig;
use crate::utility::xmlrpc::HttpTransport;

/// Loopia API credentials.
#[derive(Clone, PartialEq, Eq)]
pub struct LoopiaCredentials {
    pub endpoint: String,
    pub username: String,
    pub apikey: String,
}

impl fmt::Debug for LoopiaCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoopiaCredentials")
            .field("endpoint", &self.endpoint)
            .field("username", &self.username)
            .field("apikey", &"<redacted>")
            .finish()
    }
}

/// Encapsulates all communication with the Loopia XML-RPC API.
///
/// The client holds no state beyond its credentials; every call resolves the
/// zone again from its arguments.
#[derive(Debug)]
pub struct LoopiaClient<T = HttpTransport> {
    pub username: String,
    pub apikey: String,
    pub transport: T,
    /// Span every log line of this client is emitted in.
    pub span: Span,
}

/// The TXT record payload of `addZoneRecord`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxtRecord {
    pub ttl: u32,
    pub rdata: String,
}

/// Zone and zone-relative record name a validation name resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneTarget {
    pub zone: String,
    pub name: String,
}

/// DNS authenticator for Loopia.
///
/// Uses Loopia's XML-RPC API to fulfill a dns-01 challenge.
#[derive(Debug)]
pub struct LoopiaAuthenticator<T = HttpTransport> {
    pub config: AuthenticatorConfig,
    pub credentials: LoopiaCredentials,
    pub transport: T,
}
