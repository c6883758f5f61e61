//! Loopia DNS authenticator.
//!
//! Answers dns-01 challenges by creating `_acme-challenge` TXT records through
//! Loopia's XML-RPC API (`addZoneRecord`) and removing them again afterwards
//! (`removeSubdomain`).

pub mod constants;
pub mod functions;
pub mod impls;
pub mod types;

pub use types::{LoopiaAuthenticator, LoopiaClient, LoopiaCredentials};
