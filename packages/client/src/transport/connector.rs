//! Socket connectors
//!
//! A [`SocketConnector`] is the process's "default socket constructor": code
//! that opens a TCP connection without naming a proxy asks the installed
//! connector for one. The platform connector dials directly.

use std::fmt;
use std::io;
use std::time::Duration;

use futures::future::BoxFuture;
use socket2::{SockRef, TcpKeepalive};
use tokio::net::TcpStream;

/// Which implementation a connector is.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConnectorKind {
    Direct,
    Socks,
}

/// Opens TCP connections to `(host, port)` targets.
pub trait SocketConnector: Send + Sync + fmt::Debug {
    fn kind(&self) -> ConnectorKind;

    /// Connect to `host:port`. `host` may be a name or an IP literal.
    fn connect<'a>(&'a self, host: &'a str, port: u16) -> BoxFuture<'a, io::Result<TcpStream>>;
}

/// Platform connector: resolves locally and dials the target itself.
#[derive(Clone, Debug)]
pub struct DirectConnector {
    nodelay: bool,
    keepalive: Option<Duration>,
}

impl Default for DirectConnector {
    fn default() -> Self {
        Self {
            nodelay: true,
            keepalive: None,
        }
    }
}

impl DirectConnector {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn nodelay(mut self, nodelay: bool) -> Self {
        self.nodelay = nodelay;
        self
    }

    /// Enable TCP keepalive probes after `idle` without traffic
    #[must_use]
    pub fn keepalive(mut self, idle: Duration) -> Self {
        self.keepalive = Some(idle);
        self
    }
}

impl SocketConnector for DirectConnector {
    fn kind(&self) -> ConnectorKind {
        ConnectorKind::Direct
    }

    fn connect<'a>(&'a self, host: &'a str, port: u16) -> BoxFuture<'a, io::Result<TcpStream>> {
        Box::pin(async move {
            let stream = TcpStream::connect((host, port)).await?;
            configure_stream(&stream, self.nodelay, self.keepalive)?;
            Ok(stream)
        })
    }
}

/// Apply TCP options to an established stream.
pub(crate) fn configure_stream(
    stream: &TcpStream,
    nodelay: bool,
    keepalive: Option<Duration>,
) -> io::Result<()> {
    stream.set_nodelay(nodelay)?;

    if let Some(idle) = keepalive {
        SockRef::from(stream).set_tcp_keepalive(&TcpKeepalive::new().with_time(idle))?;
    }

    Ok(())
}
