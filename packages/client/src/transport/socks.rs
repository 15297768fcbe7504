//! SOCKS-aware connector
//!
//! Dials the registered SOCKS5 proxy and asks it to connect onward. The
//! handshake itself is `tokio-socks`.

use std::io;
use std::net::SocketAddr;

use futures::future::BoxFuture;
use tokio::net::{TcpStream, lookup_host};
use tokio_socks::IntoTargetAddr;
use tokio_socks::tcp::Socks5Stream;

use super::connector::{ConnectorKind, SocketConnector, configure_stream};
use super::facility::SocksRegistration;

/// Connector that tunnels every connection through one SOCKS5 proxy.
#[derive(Debug, Clone)]
pub struct SocksConnector {
    registration: SocksRegistration,
}

impl SocksConnector {
    #[must_use]
    pub fn new(registration: SocksRegistration) -> Self {
        Self { registration }
    }

    async fn tunnel(&self, host: &str, port: u16) -> io::Result<TcpStream> {
        let proxies = lookup_host((self.registration.addr.as_str(), self.registration.port)).await?;

        let mut last_error = None;
        for proxy in proxies {
            let attempt = if self.registration.rdns {
                // Names go to the proxy unresolved; IP literals are sent as-is.
                self.negotiate(proxy, (host, port)).await
            } else {
                match lookup_host((host, port)).await?.next() {
                    Some(target) => self.negotiate(proxy, target).await,
                    None => {
                        return Err(io::Error::new(
                            io::ErrorKind::NotFound,
                            format!("target {host} did not resolve"),
                        ));
                    }
                }
            };

            match attempt {
                Ok(stream) => return Ok(stream),
                Err(e) => {
                    tracing::debug!(
                        target: "egress::transport",
                        %proxy,
                        error = %e,
                        "SOCKS proxy address failed"
                    );
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("SOCKS proxy {} did not resolve", self.registration.addr),
            )
        }))
    }

    async fn negotiate<'t, T>(&self, proxy: SocketAddr, target: T) -> io::Result<TcpStream>
    where
        T: IntoTargetAddr<'t>,
    {
        let stream = match (&self.registration.username, &self.registration.password) {
            (Some(username), Some(password)) => {
                Socks5Stream::connect_with_password(proxy, target, username, password).await
            }
            _ => Socks5Stream::connect(proxy, target).await,
        }
        .map_err(into_io_error)?;

        let stream = stream.into_inner();
        configure_stream(&stream, true, None)?;
        Ok(stream)
    }
}

/// Transport failures keep their I/O kind; protocol and auth rejections by
/// the proxy become `ConnectionRefused`.
fn into_io_error(error: tokio_socks::Error) -> io::Error {
    match error {
        tokio_socks::Error::Io(e) => e,
        other => io::Error::new(io::ErrorKind::ConnectionRefused, other),
    }
}

impl SocketConnector for SocksConnector {
    fn kind(&self) -> ConnectorKind {
        ConnectorKind::Socks
    }

    fn connect<'a>(&'a self, host: &'a str, port: u16) -> BoxFuture<'a, io::Result<TcpStream>> {
        Box::pin(self.tunnel(host, port))
    }
}
