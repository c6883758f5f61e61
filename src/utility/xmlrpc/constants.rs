/// Content type of XML-RPC request bodies.
pub const CONTENT_TYPE_XML: &str = "text/xml; charset=utf-8";

/// User agent sent with every request.
pub const USER_AGENT: &str = concat!("loopia-dns/", env!("CARGO_PKG_VERSION"));
