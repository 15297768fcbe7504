use std::error::Error as StdError;
use std::io;

use super::types::{Error, Kind};

impl Error {
    /// Returns the error category.
    #[must_use]
    pub fn kind(&self) -> Kind {
        self.inner.kind
    }

    /// Returns true if the proxy URL was malformed.
    ///
    /// Unsupported schemes count as malformed URLs.
    #[must_use]
    pub fn is_invalid_proxy_url(&self) -> bool {
        matches!(
            self.inner.kind,
            Kind::InvalidProxyUrl | Kind::UnsupportedScheme
        )
    }

    /// Returns true if the proxy scheme is not one of http, https, socks5, socks5h.
    #[must_use]
    pub fn is_unsupported_scheme(&self) -> bool {
        matches!(self.inner.kind, Kind::UnsupportedScheme)
    }

    /// Returns true if the transport could not be installed.
    #[must_use]
    pub fn is_transport_install(&self) -> bool {
        matches!(self.inner.kind, Kind::TransportInstall)
    }

    /// Returns true if the credential manager failed.
    #[must_use]
    pub fn is_credentials(&self) -> bool {
        matches!(self.inner.kind, Kind::Credentials)
    }

    /// Returns true if a connection through the bound connector failed.
    #[must_use]
    pub fn is_connect(&self) -> bool {
        matches!(self.inner.kind, Kind::Connect)
    }

    /// Returns true if the error is related to a timeout.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        let mut source = self.source();

        while let Some(err) = source {
            if let Some(io) = err.downcast_ref::<io::Error>() {
                if io.kind() == io::ErrorKind::TimedOut {
                    return true;
                }
            }
            source = err.source();
        }

        false
    }
}
