use std::error::Error as StdError;
use std::fmt;

/// A Result alias where the Err case is `egress_client::Error`.
pub type Result<T> = std::result::Result<T, Error>;

pub(crate) type BoxError = Box<dyn StdError + Send + Sync>;

/// Errors raised while resolving proxy settings or installing the transport.
pub struct Error {
    pub(crate) inner: Box<Inner>,
}

pub(crate) struct Inner {
    pub(crate) kind: Kind,
    pub(crate) source: Option<BoxError>,
    pub(crate) proxy_url: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    /// Proxy URL without a usable scheme, host or port
    InvalidProxyUrl,
    /// Proxy URL whose scheme is not http, https, socks5 or socks5h
    UnsupportedScheme,
    /// SOCKS facility unavailable or the default-proxy registration was rejected
    TransportInstall,
    /// Credential refresh or selection failed after the transport was installed
    Credentials,
    /// Socket connection through the bound connector failed
    Connect,
}

impl Error {
    pub(crate) fn new(kind: Kind) -> Error {
        Error {
            inner: Box::new(Inner {
                kind,
                source: None,
                proxy_url: None,
            }),
        }
    }

    #[must_use = "Error builder methods return a new Error and should be used"]
    pub(crate) fn with<E: Into<BoxError>>(mut self, source: E) -> Error {
        self.inner.source = Some(source.into());
        self
    }

    /// Attach the offending proxy URL. Callers pass an already redacted form.
    #[must_use]
    pub(crate) fn with_proxy_url(mut self, url: impl Into<String>) -> Error {
        self.inner.proxy_url = Some(url.into());
        self
    }

    /// The redacted proxy URL this error is about, if any
    #[must_use]
    pub fn proxy_url(&self) -> Option<&str> {
        self.inner.proxy_url.as_deref()
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut f = f.debug_struct("egress_client::Error");

        f.field("kind", &self.inner.kind);

        if let Some(ref source) = self.inner.source {
            f.field("source", source);
        }

        if let Some(ref url) = self.inner.proxy_url {
            f.field("proxy_url", url);
        }

        f.finish()
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.inner.kind {
            Kind::InvalidProxyUrl => f.write_str("invalid proxy URL")?,
            Kind::UnsupportedScheme => f.write_str("unsupported proxy scheme")?,
            Kind::TransportInstall => f.write_str("transport installation failed")?,
            Kind::Credentials => f.write_str("credential setup failed")?,
            Kind::Connect => f.write_str("connection error")?,
        }

        if let Some(ref url) = self.inner.proxy_url {
            write!(f, " ({url})")?;
        }

        if let Some(ref source) = self.inner.source {
            write!(f, ": {source}")?;
        }

        Ok(())
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.inner
            .source
            .as_ref()
            .map(|err| &**err as &(dyn StdError + 'static))
    }
}
