// 3rd party crates
use async_trait::async_trait;
use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::Client;
use tracing::{debug, error, trace};

// Current module imports
use super::constants::{CONTENT_TYPE_XML, USER_AGENT};
use super::errors::XmlRpcError;
use super::traits::RpcTransport;
use super::types::{HttpTransport, MethodCall, MethodResponse, Value};

impl Value {
    /// The string payload, if this is a string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(text) => Some(text),
            _ => None,
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::Int(i64::from(value))
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

impl HttpTransport {
    /// Creates a transport posting to `endpoint`.
    pub fn new(endpoint: &str) -> Result<Self, XmlRpcError> {
        let mut headers: HeaderMap = HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(CONTENT_TYPE_XML));

        let client: Client = Client::builder()
            .default_headers(headers)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| {
                error!(endpoint = %endpoint, "Failed to build HTTP client: {}", e);
                XmlRpcError::Http(e)
            })?;

        Ok(Self {
            endpoint: endpoint.to_string(),
            client,
        })
    }
}

#[async_trait]
impl RpcTransport for HttpTransport {
    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn call(&self, method: &str, params: Vec<Value>) -> Result<MethodResponse, XmlRpcError> {
        let body: String = MethodCall::new(method, params).encode()?;

        debug!(endpoint = %self.endpoint, method = %method, "Sending XML-RPC request");

        let response = self.client.post(&self.endpoint).body(body).send().await?;

        let status = response.status();
        let text: String = response.text().await?;

        if !status.is_success() {
            return Err(XmlRpcError::HttpStatus {
                endpoint: self.endpoint.clone(),
                status,
                body: text,
            });
        }

        trace!(method = %method, response = %text, "Received XML-RPC response");

        MethodResponse::decode(&text)
    }
}
