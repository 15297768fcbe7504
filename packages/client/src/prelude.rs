//! egress prelude
//!
//! The types a host process needs to resolve proxies, install the transport
//! and bootstrap credentials.

// Proxy resolution
pub use crate::proxy::{EnvSnapshot, ProxyConfig, ProxyEndpoint, ProxyScheme, TrafficClass};

// Transport installation
pub use crate::transport::{
    ConnectorKind, GlobalTransportState, SocketConnector, TransportBinding, TransportInstaller,
    global_installer,
};

// Bootstrap
pub use crate::bootstrap::{
    BootstrapError, BootstrapPhase, BootstrapReport, CredentialManager, Sequencer,
    initialize_transport_and_credentials,
};

// Error types
pub use crate::error::{Error, Kind, Result};

// URL handling
pub use url::Url;
