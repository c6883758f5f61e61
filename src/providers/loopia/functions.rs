// 3rd party crates
use tracing::{debug, warn, Span};

// Project imports
use crate::providers::errors::PluginError;
use crate::utility::domain::base_domain_name_guesses;
use crate::utility::xmlrpc::{HttpTransport, MethodResponse, Value};

// Current module imports
use super::constants::{LOOPIA_API_ENDPOINT, SUCCESS_RESPONSE};
use super::types::ZoneTarget;

/// Picks the zone Loopia manages the record under.
///
/// The candidates are `record_name` followed by every label-stripped suffix of
/// `domain`, and the zone is the second-to-last of them. For a `domain` at its
/// registrable apex this is `domain` itself. Multi-level public suffixes and
/// delegated subzones are not detected.
pub fn find_managed_zone(domain: &str, record_name: &str) -> String {
    let mut guesses: Vec<String> = vec![record_name.to_string()];
    guesses.extend(base_domain_name_guesses(domain));

    // Never fewer than two: the guesses for any domain hold at least one entry.
    guesses[guesses.len() - 2].clone()
}

/// Strips `.zone` from the end of `record_name`.
///
/// Fails when `record_name` is not strictly below `zone`.
pub fn relative_record_name(record_name: &str, zone: &str) -> Result<String, PluginError> {
    record_name
        .strip_suffix(zone)
        .and_then(|prefix| prefix.strip_suffix('.'))
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .ok_or_else(|| PluginError::ZoneMismatch {
            validation_name: record_name.to_string(),
            zone: zone.to_string(),
        })
}

/// Resolves `record_name` into a zone and a zone-relative name.
///
/// Deterministic in its arguments, so a later cleanup finds the record an
/// earlier perform created.
pub fn resolve_zone(domain: &str, record_name: &str) -> Result<ZoneTarget, PluginError> {
    let zone: String = find_managed_zone(domain, record_name);
    let name: String = relative_record_name(record_name, &zone)?;

    debug!(domain = %domain, zone = %zone, name = %name, "Resolved managed zone");

    Ok(ZoneTarget { zone, name })
}

/// Whether a Loopia mutation succeeded. Only the plain string `OK` counts.
pub fn is_success(response: &MethodResponse) -> bool {
    matches!(response, MethodResponse::Success(Value::String(text)) if text == SUCCESS_RESPONSE)
}

/// Builds the transport for the Loopia API.
///
/// The configured endpoint is not honored: requests always go to
/// [`LOOPIA_API_ENDPOINT`]. A differing configured value is logged.
pub fn loopia_transport(configured_endpoint: &str, span: &Span) -> Result<HttpTransport, PluginError> {
    if configured_endpoint.trim_end_matches('/') != LOOPIA_API_ENDPOINT {
        span.in_scope(|| {
            warn!(
                configured = %configured_endpoint,
                endpoint = %LOOPIA_API_ENDPOINT,
                "Ignoring configured Loopia endpoint"
            )
        });
    }

    Ok(HttpTransport::new(LOOPIA_API_ENDPOINT)?)
}
