// 3rd party crates
use reqwest::Client;

/// A single XML-RPC value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Int(i64),
    Boolean(bool),
    Double(f64),
    Array(Vec<Value>),
    /// Members keep their insertion order on the wire.
    Struct(Vec<(String, Value)>),
    Nil,
}

/// An outgoing `<methodCall>`.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodCall {
    pub method_name: String,
    pub params: Vec<Value>,
}

/// A decoded `<methodResponse>`.
#[derive(Debug, Clone, PartialEq)]
pub enum MethodResponse {
    Success(Value),
    Fault { code: i64, message: String },
}

/// XML-RPC over HTTP(S) using a shared reqwest client.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    pub endpoint: String,
    pub client: Client,
}
