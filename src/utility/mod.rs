pub mod credentials;
pub mod domain;
pub mod xmlrpc;
