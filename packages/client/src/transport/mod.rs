//! Process-wide socket transport
//!
//! A swappable default connector stands in for the platform socket
//! constructor. [`install`] binds a SOCKS-aware connector when `ALL_PROXY`
//! names a SOCKS proxy and [`restore`] puts the platform connector back.
//! The free functions here act on [`global_installer`], so their effect is
//! visible to every component of the process, not just the caller.

pub mod connector;
pub mod facility;
pub mod installer;
#[cfg(feature = "socks")]
pub mod socks;
pub mod state;

use std::io;
use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpStream;

pub use connector::{ConnectorKind, DirectConnector, SocketConnector};
pub use facility::{RegistrationError, SocksFacility, SocksProxyType, SocksRegistration};
pub use installer::{TransportBinding, TransportInstaller, global_installer};
#[cfg(feature = "socks")]
pub use socks::SocksConnector;
pub use state::GlobalTransportState;

use crate::error::{self, Result};
use crate::proxy::ProxyConfig;

/// Apply `config` to the process-wide connector binding.
///
/// # Errors
///
/// See [`TransportInstaller::install`].
pub fn install(config: &ProxyConfig) -> Result<GlobalTransportState> {
    global_installer().install(config)
}

/// Put the platform connector back as the process-wide default.
pub fn restore() -> GlobalTransportState {
    global_installer().restore()
}

/// Process-wide transport state
#[must_use]
pub fn state() -> GlobalTransportState {
    global_installer().state()
}

/// Connector currently bound for the process
#[must_use]
pub fn default_connector() -> Arc<dyn SocketConnector> {
    global_installer().default_connector()
}

/// Open a TCP connection with whatever connector the process has bound.
///
/// # Errors
///
/// Returns a connect error when the connection or SOCKS negotiation fails.
pub async fn connect(host: &str, port: u16) -> Result<TcpStream> {
    let connector = default_connector();
    connector.connect(host, port).await.map_err(|e| {
        tracing::debug!(
            target: "egress::transport",
            host,
            port,
            kind = ?connector.kind(),
            error = %e,
            "connection failed"
        );
        error::connect(e)
    })
}

/// [`connect`] bounded by `timeout`.
///
/// # Errors
///
/// Returns a connect error, classified by `is_timeout()` when the deadline
/// passed first.
pub async fn connect_timeout(host: &str, port: u16, timeout: Duration) -> Result<TcpStream> {
    match tokio::time::timeout(timeout, connect(host, port)).await {
        Ok(result) => result,
        Err(elapsed) => Err(error::connect(io::Error::new(io::ErrorKind::TimedOut, elapsed))),
    }
}
