//! Minimal XML-RPC client.
//!
//! Covers the subset of the protocol the Loopia API speaks: typed scalar
//! values, arrays, structs, fault responses and UTF-8 bodies posted over
//! HTTP(S).

pub mod codec;
pub mod constants;
pub mod errors;
pub mod impls;
pub mod traits;
pub mod types;

pub use errors::XmlRpcError;
pub use traits::RpcTransport;
pub use types::{HttpTransport, MethodCall, MethodResponse, Value};
