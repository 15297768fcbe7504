//! Proxy scheme classification
//!
//! Separates the HTTP family, which the HTTP client consumes per request,
//! from the SOCKS family, which is installed process-wide.

use std::fmt;

use serde::Serialize;

/// Scheme of a proxy URL.
///
/// `Https` describes the proxy's own listener (TLS to the proxy), not the
/// scheme of the requests sent through it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProxyScheme {
    Http,
    Https,
    Socks5,
    /// SOCKS5 with hostname resolution at the proxy
    Socks5h,
}

impl ProxyScheme {
    /// Map a URL scheme to a proxy scheme. Schemes are expected lowercase, as
    /// the URL parser produces them.
    #[must_use]
    pub fn from_scheme(scheme: &str) -> Option<Self> {
        match scheme {
            "http" => Some(Self::Http),
            "https" => Some(Self::Https),
            "socks5" => Some(Self::Socks5),
            "socks5h" => Some(Self::Socks5h),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Http => "http",
            Self::Https => "https",
            Self::Socks5 => "socks5",
            Self::Socks5h => "socks5h",
        }
    }

    /// True for schemes that require global socket substitution
    #[inline]
    #[must_use]
    pub fn is_socks(self) -> bool {
        matches!(self, Self::Socks5 | Self::Socks5h)
    }

    /// True for schemes left to the HTTP client
    #[inline]
    #[must_use]
    pub fn is_http(self) -> bool {
        matches!(self, Self::Http | Self::Https)
    }

    /// Whether target hostnames are resolved by the proxy (`socks5h`) rather
    /// than locally before connecting.
    #[inline]
    #[must_use]
    pub fn rdns(self) -> bool {
        matches!(self, Self::Socks5h)
    }
}

impl fmt::Display for ProxyScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
