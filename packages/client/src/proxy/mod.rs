//! Proxy URL parsing and environment resolution
//!
//! Parses `ALL_PROXY`, `HTTP_PROXY`, `HTTPS_PROXY` and `NO_PROXY` into a
//! [`ProxyConfig`]. Nothing in this module mutates process state; applying a
//! SOCKS endpoint is the job of [`crate::transport`].

pub mod config;
pub mod endpoint;
pub mod env;
pub mod no_proxy;
pub mod scheme;
pub mod url_handling;

pub use config::{ProxyConfig, TrafficClass};
pub use endpoint::ProxyEndpoint;
pub use env::EnvSnapshot;
pub use no_proxy::NoProxy;
pub use scheme::ProxyScheme;

/// Parse a single proxy URL.
///
/// # Errors
///
/// See [`ProxyEndpoint::parse`].
pub fn parse_proxy_url(raw: &str) -> crate::Result<ProxyEndpoint> {
    ProxyEndpoint::parse(raw)
}
