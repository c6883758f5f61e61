// Project imports
use crate::utility::credentials::RequiredVariable;

/// Plugin name, also the prefix of its CLI flags and credential keys.
pub const PLUGIN_NAME: &str = "dns-loopia";

pub const DESCRIPTION: &str =
    "Obtain certificates using a DNS TXT record (if you are using Loopia for DNS).";

pub const MORE_INFO: &str = "This plugin configures a DNS TXT record to respond to a dns-01 \
     challenge using Loopias XML-RPC API.";

/// Production XML-RPC endpoint. Used regardless of the configured endpoint.
pub const LOOPIA_API_ENDPOINT: &str = "https://api.loopia.se/RPCSERV";

/// TTL of every challenge record, in seconds.
pub const TXT_RECORD_TTL: u32 = 60;

/// Sent as `record_id` when creating records; the API assigns its own.
pub const RECORD_ID_PLACEHOLDER: i64 = 999;

/// The only response Loopia returns for a successful mutation.
pub const SUCCESS_RESPONSE: &str = "OK";

pub const METHOD_ADD_ZONE_RECORD: &str = "addZoneRecord";
pub const METHOD_REMOVE_SUBDOMAIN: &str = "removeSubdomain";

/// Keys the credentials file must define.
pub const CREDENTIAL_VARIABLES: [RequiredVariable; 3] = [
    RequiredVariable {
        key: "endpoint",
        description: "URL of the Loopia API.",
    },
    RequiredVariable {
        key: "username",
        description: "Username for Loopia API.",
    },
    RequiredVariable {
        key: "apikey",
        description: "API key for Loopia API.",
    },
];
