//! Proxy endpoint parsing
//!
//! Turns `scheme://[user:pass@]host:port` into a [`ProxyEndpoint`]. Parsing
//! has no side effects; nothing here touches the installed transport.

use std::fmt;

use serde::Serialize;
use url::{Host, Url};

use super::scheme::ProxyScheme;
use super::url_handling::{decode_userinfo, explicit_port, redact};
use crate::error::{self, Result};

/// A parsed proxy location with optional credentials.
#[derive(Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ProxyEndpoint {
    scheme: ProxyScheme,
    host: String,
    port: u16,
    username: Option<String>,
    #[serde(skip_serializing)]
    password: Option<String>,
}

impl ProxyEndpoint {
    /// Build an endpoint from parts without validation.
    ///
    /// [`ProxyEndpoint::parse`] is the validating entry point; values built
    /// here are checked again when a SOCKS endpoint is registered.
    pub fn new(scheme: ProxyScheme, host: impl Into<String>, port: u16) -> Self {
        Self {
            scheme,
            host: host.into(),
            port,
            username: None,
            password: None,
        }
    }

    /// Attach credentials
    #[must_use]
    pub fn with_credentials(
        mut self,
        username: impl Into<String>,
        password: Option<String>,
    ) -> Self {
        self.username = Some(username.into());
        self.password = password;
        self
    }

    /// Parse a proxy URL.
    ///
    /// # Errors
    ///
    /// Returns an error classified by [`crate::Error::is_invalid_proxy_url`]
    /// when the URL has no recognized scheme, no host, or no explicit
    /// non-zero port, or when its credentials do not decode to UTF-8.
    pub fn parse(raw: &str) -> Result<Self> {
        let raw = raw.trim();
        let invalid = |reason: &str| {
            error::invalid_proxy_url(reason.to_owned()).with_proxy_url(redact(raw))
        };

        let url = Url::parse(raw)
            .map_err(|e| error::invalid_proxy_url(e).with_proxy_url(redact(raw)))?;

        let scheme = ProxyScheme::from_scheme(url.scheme())
            .ok_or_else(|| error::unsupported_scheme(url.scheme()).with_proxy_url(redact(raw)))?;

        let host = match url.host() {
            Some(Host::Domain(domain)) if !domain.is_empty() => domain.to_owned(),
            Some(Host::Ipv4(ip)) => ip.to_string(),
            Some(Host::Ipv6(ip)) => ip.to_string(),
            _ => return Err(invalid("proxy URL must have a host")),
        };

        let port = explicit_port(&url, raw).ok_or_else(|| invalid("proxy URL must have a port"))?;
        if port == 0 {
            return Err(invalid("proxy port cannot be 0"));
        }

        let username = match url.username() {
            "" => None,
            name => Some(decode_userinfo(name).map_err(|e| e.with_proxy_url(redact(raw)))?),
        };
        let password = url
            .password()
            .map(decode_userinfo)
            .transpose()
            .map_err(|e| e.with_proxy_url(redact(raw)))?;

        Ok(Self {
            scheme,
            host,
            port,
            username,
            password,
        })
    }

    #[inline]
    #[must_use]
    pub fn scheme(&self) -> ProxyScheme {
        self.scheme
    }

    /// Host name or IP literal; IPv6 literals carry no brackets
    #[inline]
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    #[inline]
    #[must_use]
    pub fn port(&self) -> u16 {
        self.port
    }

    #[inline]
    #[must_use]
    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    #[inline]
    #[must_use]
    pub fn password(&self) -> Option<&str> {
        self.password.as_deref()
    }

    /// Remote DNS flag derived from the scheme
    #[inline]
    #[must_use]
    pub fn rdns(&self) -> bool {
        self.scheme.rdns()
    }

    #[inline]
    #[must_use]
    pub fn is_socks(&self) -> bool {
        self.scheme.is_socks()
    }

    /// `(host, port)` pair as a connector would dial it
    #[must_use]
    pub fn addr(&self) -> (&str, u16) {
        (&self.host, self.port)
    }
}

// Display and Debug never print the password.
impl fmt::Display for ProxyEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://", self.scheme)?;
        if let Some(ref username) = self.username {
            write!(f, "{username}@")?;
        }
        if self.host.contains(':') {
            write!(f, "[{}]:{}", self.host, self.port)
        } else {
            write!(f, "{}:{}", self.host, self.port)
        }
    }
}

impl fmt::Debug for ProxyEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProxyEndpoint")
            .field("scheme", &self.scheme)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}
