// Standard library
use std::collections::HashMap;
use std::fs;
use std::path::Path;

// 3rd party crates
use ini::{Ini, ParseOption};
use tracing::{debug, error, warn};

// Current module imports
use super::errors::CredentialsError;
use super::types::{CredentialsConfiguration, RequiredVariable};

impl CredentialsConfiguration {
    /// Loads an INI credentials file and checks that every required key is set.
    ///
    /// `namespace` is prepended to each key, so with namespace `dns_loopia_` the
    /// key `apikey` is read from the `dns_loopia_apikey` line.
    pub fn load(
        path: &Path,
        namespace: &str,
        required: &[RequiredVariable],
    ) -> Result<Self, CredentialsError> {
        if !path.is_file() {
            error!(path = %path.display(), "Credentials file not found");
            return Err(CredentialsError::NotFound(path.to_path_buf()));
        }

        validate_file_permissions(path);

        let content: String =
            fs::read_to_string(path).map_err(|source| CredentialsError::Unreadable {
                path: path.to_path_buf(),
                source,
            })?;

        // Backslashes are literal: API keys are user-chosen and may contain them.
        let options = ParseOption {
            enabled_escape: false,
            ..Default::default()
        };
        let ini: Ini = Ini::load_from_str_opt(&content, options).map_err(|source| {
            CredentialsError::Parse {
                path: path.to_path_buf(),
                source,
            }
        })?;

        // Sections are not part of the format; only top-level keys count.
        let values: HashMap<String, String> = ini
            .general_section()
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();

        debug!(path = %path.display(), keys = values.len(), "Loaded credentials file");

        let configuration = Self {
            path: path.to_path_buf(),
            namespace: namespace.to_string(),
            values,
        };
        configuration.require(required)?;

        Ok(configuration)
    }

    /// Value of `key` within this file's namespace. Blank values count as unset.
    pub fn conf(&self, key: &str) -> Option<&str> {
        self.values
            .get(&self.dest(key))
            .map(String::as_str)
            .filter(|value| !value.trim().is_empty())
    }

    fn dest(&self, key: &str) -> String {
        format!("{}{}", self.namespace, key.replace('-', "_"))
    }

    fn require(&self, required: &[RequiredVariable]) -> Result<(), CredentialsError> {
        for variable in required {
            if self.conf(variable.key).is_none() {
                return Err(CredentialsError::MissingProperty {
                    path: self.path.clone(),
                    key: self.dest(variable.key),
                    description: variable.description.to_string(),
                });
            }
        }
        Ok(())
    }
}

/// Key namespace for a plugin name: `dns-loopia` becomes `dns_loopia_`.
pub fn namespace_for(plugin_name: &str) -> String {
    format!("{}_", plugin_name.replace('-', "_"))
}

#[cfg(unix)]
fn validate_file_permissions(path: &Path) {
    use std::os::unix::fs::PermissionsExt;

    if let Ok(metadata) = fs::metadata(path) {
        let mode: u32 = metadata.permissions().mode() & 0o777;
        if mode & 0o077 != 0 {
            warn!(
                path = %path.display(),
                mode = format!("{:o}", mode),
                "Unsafe permissions on credentials configuration file"
            );
        }
    }
}

#[cfg(not(unix))]
fn validate_file_permissions(_path: &Path) {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const REQUIRED: &[RequiredVariable] = &[
        RequiredVariable {
            key: "username",
            description: "Username for Loopia API.",
        },
        RequiredVariable {
            key: "apikey",
            description: "API key for Loopia API.",
        },
    ];

    fn write_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn test_load_namespaced_keys() {
        let file = write_file(
            "dns_loopia_endpoint = https://api.loopia.se/RPCSERV\n\
             dns_loopia_username = user@loopiaapi\n\
             dns_loopia_apikey = secret\n",
        );

        let creds = CredentialsConfiguration::load(file.path(), "dns_loopia_", REQUIRED).unwrap();

        assert_eq!(creds.conf("username"), Some("user@loopiaapi"));
        assert_eq!(creds.conf("apikey"), Some("secret"));
        assert_eq!(creds.conf("endpoint"), Some("https://api.loopia.se/RPCSERV"));
        assert_eq!(creds.conf("missing"), None);
    }

    #[test]
    fn test_missing_required_key() {
        let file = write_file("dns_loopia_username = user@loopiaapi\n");

        let err = CredentialsConfiguration::load(file.path(), "dns_loopia_", REQUIRED).unwrap_err();

        match &err {
            CredentialsError::MissingProperty { key, description, .. } => {
                assert_eq!(key, "dns_loopia_apikey");
                assert_eq!(description, "API key for Loopia API.");
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert!(err.to_string().contains("Property \"dns_loopia_apikey\" not found"));
    }

    #[test]
    fn test_blank_value_counts_as_missing() {
        let file = write_file("dns_loopia_username = user\ndns_loopia_apikey =\n");

        let err = CredentialsConfiguration::load(file.path(), "dns_loopia_", REQUIRED).unwrap_err();
        assert!(matches!(err, CredentialsError::MissingProperty { .. }));
    }

    #[test]
    fn test_unprefixed_keys_are_not_used() {
        let file = write_file("username = user\napikey = secret\n");

        let err = CredentialsConfiguration::load(file.path(), "dns_loopia_", REQUIRED).unwrap_err();
        assert!(matches!(err, CredentialsError::MissingProperty { .. }));
    }

    #[test]
    fn test_backslash_kept_literally() {
        let file = write_file(
            "dns_loopia_username = user@loopiaapi\n\
             dns_loopia_apikey = ab\\cd\\nef\n",
        );

        let creds = CredentialsConfiguration::load(file.path(), "dns_loopia_", REQUIRED).unwrap();
        assert_eq!(creds.conf("apikey"), Some("ab\\cd\\nef"));
    }

    #[test]
    fn test_quoted_value_is_unquoted() {
        let file = write_file(
            "dns_loopia_username = \"user@loopiaapi\"\n\
             dns_loopia_apikey = 'p@ss:w=rd'\n",
        );

        let creds = CredentialsConfiguration::load(file.path(), "dns_loopia_", REQUIRED).unwrap();
        assert_eq!(creds.conf("username"), Some("user@loopiaapi"));
        assert_eq!(creds.conf("apikey"), Some("p@ss:w=rd"));
    }

    #[test]
    fn test_section_keys_are_ignored() {
        let file = write_file("[loopia]\ndns_loopia_username = user\ndns_loopia_apikey = secret\n");

        let err = CredentialsConfiguration::load(file.path(), "dns_loopia_", REQUIRED).unwrap_err();
        assert!(matches!(err, CredentialsError::MissingProperty { .. }));
    }

    #[test]
    fn test_file_not_found() {
        let err = CredentialsConfiguration::load(
            Path::new("/nonexistent/loopia.ini"),
            "dns_loopia_",
            REQUIRED,
        )
        .unwrap_err();

        assert!(matches!(err, CredentialsError::NotFound(_)));
        assert!(err.to_string().starts_with("File not found"));
    }

    #[test]
    fn test_namespace_for() {
        assert_eq!(namespace_for("dns-loopia"), "dns_loopia_");
    }
}
