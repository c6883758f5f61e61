// 3rd party crates
use async_trait::async_trait;

// Current module imports
use super::errors::XmlRpcError;
use super::types::{MethodResponse, Value};

/// Carries one XML-RPC method call to a remote endpoint and returns its decoded response.
///
/// A fault response is a successful round trip and comes back as
/// [`MethodResponse::Fault`]; only network, HTTP and decoding problems are errors.
#[async_trait]
pub trait RpcTransport: Send + Sync {
    /// The URL calls are posted to.
    fn endpoint(&self) -> &str;

    /// Issues `method(params...)` and waits for the response.
    async fn call(&self, method: &str, params: Vec<Value>) -> Result<MethodResponse, XmlRpcError>;
}
