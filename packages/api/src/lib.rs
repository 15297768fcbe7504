//! # egress
//!
//! Resolve `ALL_PROXY`, `HTTP_PROXY`, `HTTPS_PROXY` and `NO_PROXY`, install
//! the matching transport for the whole process, then bootstrap credentials.
//!
//! ```no_run
//! # async fn run() -> egress::Result<()> {
//! // SOCKS ALL_PROXY: every socket opened afterwards is tunneled.
//! // HTTP proxies: left to the HTTP client, nothing global changes.
//! let state = egress::Egress::new().install()?;
//! println!("transport: {state:?}");
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]

pub mod builder;

pub use builder::Egress;

// Re-export important types from client package
pub use egress_client::bootstrap::{
    BootstrapError, BootstrapPhase, BootstrapReport, CredentialError, CredentialManager, Sequencer,
    initialize_transport_and_credentials,
};
pub use egress_client::proxy::{
    EnvSnapshot, NoProxy, ProxyConfig, ProxyEndpoint, ProxyScheme, TrafficClass, parse_proxy_url,
};
pub use egress_client::transport::{
    ConnectorKind, DirectConnector, GlobalTransportState, SocketConnector, TransportBinding,
    TransportInstaller, connect, connect_timeout, default_connector, global_installer, install,
    restore, state,
};
pub use egress_client::{Error, Result};
