//! SOCKS socket facility
//!
//! Holds the default-proxy registration for the SOCKS-aware connector and
//! hands out connectors bound to it. Whether SOCKS support exists at all is
//! decided at build time by the `socks` cargo feature.

use std::sync::{Arc, PoisonError, RwLock};

use super::connector::SocketConnector;
use crate::proxy::ProxyEndpoint;

/// SOCKS5 username/password fields are length-prefixed with one byte.
const MAX_CREDENTIAL_LEN: usize = 255;

/// SOCKS protocol spoken to the proxy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SocksProxyType {
    Socks5,
}

/// Default proxy record of the SOCKS facility.
#[derive(Clone, PartialEq, Eq)]
pub struct SocksRegistration {
    pub proxy_type: SocksProxyType,
    pub addr: String,
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
    /// Resolve target hostnames at the proxy
    pub rdns: bool,
}

impl SocksRegistration {
    /// Registration for a SOCKS endpoint; `rdns` follows the scheme.
    #[must_use]
    pub fn from_endpoint(endpoint: &ProxyEndpoint) -> Self {
        Self {
            proxy_type: SocksProxyType::Socks5,
            addr: endpoint.host().to_owned(),
            port: endpoint.port(),
            username: endpoint.username().map(str::to_owned),
            password: endpoint.password().map(str::to_owned),
            rdns: endpoint.rdns(),
        }
    }

    fn validate(&self) -> Result<(), RegistrationError> {
        if self.addr.trim().is_empty() {
            return Err(RegistrationError::EmptyAddress);
        }
        if self.port == 0 {
            return Err(RegistrationError::InvalidPort(self.port));
        }
        match (&self.username, &self.password) {
            (None, None) => Ok(()),
            (Some(username), Some(password)) => {
                for value in [username, password] {
                    if value.is_empty() || value.len() > MAX_CREDENTIAL_LEN {
                        return Err(RegistrationError::CredentialLength(value.len()));
                    }
                }
                Ok(())
            }
            _ => Err(RegistrationError::IncompleteCredentials),
        }
    }
}

impl std::fmt::Debug for SocksRegistration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SocksRegistration")
            .field("proxy_type", &self.proxy_type)
            .field("addr", &self.addr)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("rdns", &self.rdns)
            .finish()
    }
}

/// Reasons the facility refuses a registration or a connector.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistrationError {
    #[error("SOCKS support is not available in this build (enable the `socks` feature)")]
    Unavailable,
    #[error("SOCKS proxy address is empty")]
    EmptyAddress,
    #[error("SOCKS proxy port {0} is outside 1-65535")]
    InvalidPort(u16),
    #[error("SOCKS5 authentication needs both a username and a password")]
    IncompleteCredentials,
    #[error("SOCKS5 credential length {0} is outside 1-255 bytes")]
    CredentialLength(usize),
    #[error("no default SOCKS proxy is registered")]
    NotRegistered,
}

/// Registration store for the SOCKS-aware connector.
#[derive(Debug, Default)]
pub struct SocksFacility {
    default_proxy: RwLock<Option<SocksRegistration>>,
}

impl SocksFacility {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether this build carries a SOCKS implementation
    #[must_use]
    pub fn is_available(&self) -> bool {
        cfg!(feature = "socks")
    }

    /// Register the default proxy. The previous registration is kept when
    /// the new one is rejected.
    ///
    /// # Errors
    ///
    /// Returns a [`RegistrationError`] when SOCKS is unavailable or a
    /// parameter is out of range.
    pub fn set_default_proxy(
        &self,
        registration: SocksRegistration,
    ) -> Result<(), RegistrationError> {
        if !self.is_available() {
            return Err(RegistrationError::Unavailable);
        }
        registration.validate()?;

        log::debug!(
            "registering default SOCKS proxy {}:{} (rdns={})",
            registration.addr,
            registration.port,
            registration.rdns
        );
        *self.default_proxy.write().unwrap_or_else(PoisonError::into_inner) = Some(registration);
        Ok(())
    }

    /// Forget the default proxy
    pub fn clear_default_proxy(&self) {
        let previous = self
            .default_proxy
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if previous.is_some() {
            log::debug!("cleared default SOCKS proxy");
        }
    }

    /// Current default proxy registration
    #[must_use]
    pub fn default_proxy(&self) -> Option<SocksRegistration> {
        self.default_proxy
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// A SOCKS-aware connector bound to the current default proxy.
    ///
    /// # Errors
    ///
    /// [`RegistrationError::Unavailable`] without the `socks` feature,
    /// [`RegistrationError::NotRegistered`] when no default proxy is set.
    pub fn connector(&self) -> Result<Arc<dyn SocketConnector>, RegistrationError> {
        #[cfg(feature = "socks")]
        {
            let registration = self.default_proxy().ok_or(RegistrationError::NotRegistered)?;
            Ok(Arc::new(super::socks::SocksConnector::new(registration)))
        }

        #[cfg(not(feature = "socks"))]
        {
            Err(RegistrationError::Unavailable)
        }
    }
}
