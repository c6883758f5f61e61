/// Prefix of the record a dns-01 challenge is validated against.
pub const ACME_CHALLENGE_PREFIX: &str = "_acme-challenge";

/// Returns every suffix of `domain` obtained by stripping the left-most label,
/// most labels first.
///
/// `"a.example.com"` yields `["a.example.com", "example.com", "com"]`. The list
/// is not public-suffix aware and always holds at least one element.
pub fn base_domain_name_guesses(domain: &str) -> Vec<String> {
    let fragments: Vec<&str> = domain.split('.').collect();
    (0..fragments.len())
        .map(|start| fragments[start..].join("."))
        .collect()
}

/// Name of the TXT record validating `domain`, e.g. `_acme-challenge.example.com`.
///
/// A leading wildcard label is dropped, since `*.example.com` validates at the
/// same name as `example.com`.
pub fn validation_domain_name(domain: &str) -> String {
    let domain: &str = domain.strip_prefix("*.").unwrap_or(domain);
    format!("{}.{}", ACME_CHALLENGE_PREFIX, domain)
}
