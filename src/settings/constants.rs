/// Environment variable naming the configuration file.
pub const CONFIG_PATH_ENV: &str = "LOOPIA_DNS_CONFIG_PATH";

/// Prefix of environment variables overriding settings, e.g. `LOOPIA_DNS__LOG__LEVEL`.
pub const ENV_PREFIX: &str = "LOOPIA_DNS";
pub const ENV_SEPARATOR: &str = "__";

pub const CONFIG_DIR_NAME: &str = "loopia-dns";
pub const CONFIG_FILE_NAME: &str = "config.toml";

pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_AUTHENTICATOR: &str = "dns-loopia";

/// Example configuration
pub const DEFAULT_CONFIG: &str = r#"
# Logging configuration
[log]
# Level can be "error", "warn", "info", "debug", or "trace"
level = "info"

# Authenticator used for dns-01 challenges
[authenticator]
name = "dns-loopia"

# INI file holding dns_loopia_endpoint, dns_loopia_username and dns_loopia_apikey.
# Keep it readable by its owner only.
# credentials = "/etc/letsencrypt/loopia.ini"

# Seconds to wait for DNS changes to propagate before validation
propagation_seconds = 120
"#;
