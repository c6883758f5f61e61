// Standard library
use std::path::Path;

// 3rd party crates
use async_trait::async_trait;
use tracing::{error, info, info_span, Instrument, Span};

// Project imports
use crate::providers::errors::PluginError;
use crate::providers::traits::DnsAuthenticator;
use crate::providers::types::{AuthenticatorConfig, ChallengeRequest};
use crate::utility::credentials::{namespace_for, CredentialsConfiguration};
use crate::utility::xmlrpc::{HttpTransport, MethodResponse, RpcTransport, Value};

// Current module imports
use super::constants::{
    CREDENTIAL_VARIABLES, DESCRIPTION, METHOD_ADD_ZONE_RECORD, METHOD_REMOVE_SUBDOMAIN,
    MORE_INFO, PLUGIN_NAME, RECORD_ID_PLACEHOLDER, TXT_RECORD_TTL,
};
use super::functions::{is_success, loopia_transport, resolve_zone};
use super::types::{LoopiaAuthenticator, LoopiaClient, LoopiaCredentials, TxtRecord};

impl LoopiaCredentials {
    /// Reads `dns_loopia_endpoint`, `dns_loopia_username` and `dns_loopia_apikey`
    /// from an INI credentials file.
    pub fn load(path: &Path) -> Result<Self, PluginError> {
        let configuration: CredentialsConfiguration =
            CredentialsConfiguration::load(path, &namespace_for(PLUGIN_NAME), &CREDENTIAL_VARIABLES)?;

        // Presence was checked by `load`.
        let value = |key: &str| configuration.conf(key).unwrap_or_default().to_string();

        Ok(Self {
            endpoint: value("endpoint"),
            username: value("username"),
            apikey: value("apikey"),
        })
    }
}

impl TxtRecord {
    pub fn new(rdata: &str, ttl: u32) -> Self {
        Self {
            ttl,
            rdata: rdata.to_string(),
        }
    }
}

impl From<&TxtRecord> for Value {
    fn from(record: &TxtRecord) -> Self {
        Value::Struct(vec![
            ("type".to_string(), Value::from("TXT")),
            ("ttl".to_string(), Value::from(record.ttl)),
            ("priority".to_string(), Value::Int(0)),
            ("rdata".to_string(), Value::from(record.rdata.as_str())),
            ("record_id".to_string(), Value::Int(RECORD_ID_PLACEHOLDER)),
        ])
    }
}

impl<T: RpcTransport> LoopiaClient<T> {
    pub fn with_transport(transport: T, credentials: &LoopiaCredentials, span: Span) -> Self {
        span.in_scope(|| info!(endpoint = %transport.endpoint(), "Creating Loopia client"));
        Self {
            username: credentials.username.clone(),
            apikey: credentials.apikey.clone(),
            transport,
            span,
        }
    }

    /// Adds a TXT record named `record_name` holding `record_content`.
    ///
    /// Fails with [`PluginError::AddRecordFailed`] unless Loopia answers `OK`.
    pub async fn add_txt_record(
        &self,
        domain: &str,
        record_name: &str,
        record_content: &str,
        record_ttl: u32,
    ) -> Result<(), PluginError> {
        self.add(domain, record_name, record_content, record_ttl)
            .instrument(self.span.clone())
            .await
    }

    /// Removes the subdomain `record_name` from its zone.
    ///
    /// This is Loopia's `removeSubdomain`: every record under the name goes,
    /// not only TXT records. No narrower call exists that works without a
    /// record id, and no id is carried over from `add_txt_record`.
    ///
    /// Fails with [`PluginError::RemoveRecordFailed`] unless Loopia answers `OK`.
    pub async fn del_txt_record(&self, domain: &str, record_name: &str) -> Result<(), PluginError> {
        self.remove(domain, record_name)
            .instrument(self.span.clone())
            .await
    }

    async fn add(
        &self,
        domain: &str,
        record_name: &str,
        record_content: &str,
        record_ttl: u32,
    ) -> Result<(), PluginError> {
        let target = resolve_zone(domain, record_name)?;
        let record: TxtRecord = TxtRecord::new(record_content, record_ttl);

        info!(zone = %target.zone, name = %target.name, ttl = record_ttl, "Adding TXT record");

        let response: MethodResponse = self
            .transport
            .call(
                METHOD_ADD_ZONE_RECORD,
                vec![
                    Value::from(self.username.as_str()),
                    Value::from(self.apikey.as_str()),
                    Value::from(target.zone.as_str()),
                    Value::from(target.name.as_str()),
                    Value::from(&record),
                ],
            )
            .await?;

        if !is_success(&response) {
            error!(zone = %target.zone, name = %target.name, response = ?response, "Loopia rejected TXT record");
            return Err(PluginError::AddRecordFailed);
        }

        info!(zone = %target.zone, name = %target.name, "Successfully added TXT record");
        Ok(())
    }

    async fn remove(&self, domain: &str, record_name: &str) -> Result<(), PluginError> {
        let target = resolve_zone(domain, record_name)?;

        info!(zone = %target.zone, name = %target.name, "Removing subdomain");

        let response: MethodResponse = self
            .transport
            .call(
                METHOD_REMOVE_SUBDOMAIN,
                vec![
                    Value::from(self.username.as_str()),
                    Value::from(self.apikey.as_str()),
                    Value::from(target.zone.as_str()),
                    Value::from(target.name.as_str()),
                ],
            )
            .await?;

        if !is_success(&response) {
            error!(zone = %target.zone, name = %target.name, response = ?response, "Loopia refused to remove subdomain");
            return Err(PluginError::RemoveRecordFailed);
        }

        info!(zone = %target.zone, name = %target.name, "Successfully removed subdomain");
        Ok(())
    }
}

impl LoopiaAuthenticator<HttpTransport> {
    /// Loads the credentials file named in `config` and prepares the transport.
    pub fn new(config: AuthenticatorConfig) -> Result<Self, PluginError> {
        let path = config
            .credentials
            .clone()
            .ok_or_else(|| PluginError::MissingCredentials(PLUGIN_NAME.to_string()))?;

        let credentials: LoopiaCredentials = LoopiaCredentials::load(&path)?;
        let transport: HttpTransport =
            loopia_transport(&credentials.endpoint, &info_span!("loopia", operation = "setup"))?;

        Ok(Self::with_transport(config, credentials, transport))
    }
}

impl<T: RpcTransport + Clone> LoopiaAuthenticator<T> {
    pub fn with_transport(config: AuthenticatorConfig, credentials: LoopiaCredentials, transport: T) -> Self {
        Self {
            config,
            credentials,
            transport,
        }
    }

    fn get_loopia_client(&self, operation: &'static str, challenge: &ChallengeRequest) -> LoopiaClient<T> {
        let span: Span = info_span!("loopia", operation, domain = %challenge.domain);
        LoopiaClient::with_transport(self.transport.clone(), &self.credentials, span)
    }
}

#[async_trait]
impl<T> DnsAuthenticator for LoopiaAuthenticator<T>
where
    T: RpcTransport + Clone + 'static,
{
    fn name(&self) -> &'static str {
        PLUGIN_NAME
    }

    fn description(&self) -> &'static str {
        DESCRIPTION
    }

    fn more_info(&self) -> String {
        MORE_INFO.to_string()
    }

    fn propagation_seconds(&self) -> u64 {
        self.config.propagation_seconds
    }

    async fn perform(&self, challenge: &ChallengeRequest) -> Result<(), PluginError> {
        self.get_loopia_client("perform", challenge)
            .add_txt_record(
                &challenge.domain,
                &challenge.validation_name,
                &challenge.validation,
                TXT_RECORD_TTL,
            )
            .await
    }

    async fn cleanup(&self, challenge: &ChallengeRequest) -> Result<(), PluginError> {
        self.get_loopia_client("cleanup", challenge)
            .del_txt_record(&challenge.domain, &challenge.validation_name)
            .await
    }
}
