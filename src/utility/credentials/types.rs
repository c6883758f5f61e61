// Standard library
use std::collections::HashMap;
use std::path::PathBuf;

/// Key/value pairs read from an INI credentials file.
///
/// Keys are stored namespaced (`dns_loopia_username`), lookups take the bare
/// key (`username`).
#[derive(Debug, Clone)]
pub struct CredentialsConfiguration {
    pub path: PathBuf,
    pub namespace: String,
    pub values: HashMap<String, String>,
}

/// A required key and a human description of what it should contain.
#[derive(Debug, Clone, Copy)]
pub struct RequiredVariable {
    pub key: &'static str,
    pub description: &'static str,
}
