//! Resolved proxy configuration
//!
//! Two integration paths come out of resolution and stay separate:
//! a SOCKS `ALL_PROXY` that the transport installer applies process-wide,
//! and HTTP-family proxies the HTTP client applies per request.

use url::{Host, Url};

use super::endpoint::ProxyEndpoint;
use super::env::{ALL_PROXY, EnvSnapshot, HTTP_PROXY, HTTPS_PROXY, NO_PROXY};
use super::no_proxy::NoProxy;
use crate::error::Result;

/// Class of traffic a proxy variable applies to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TrafficClass {
    Http,
    Https,
    All,
}

/// Proxy settings resolved from one environment snapshot.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProxyConfig {
    http: Option<ProxyEndpoint>,
    https: Option<ProxyEndpoint>,
    all: Option<ProxyEndpoint>,
    no_proxy: Option<NoProxy>,
}

impl ProxyConfig {
    /// Resolve proxy settings from an environment snapshot.
    ///
    /// # Errors
    ///
    /// Fails with an invalid-proxy-URL error when any of `ALL_PROXY`,
    /// `HTTP_PROXY` or `HTTPS_PROXY` is set to a malformed URL.
    pub fn from_env(env: &EnvSnapshot) -> Result<Self> {
        let parse = |name: &str| env.get(name).map(ProxyEndpoint::parse).transpose();

        let config = Self {
            http: parse(HTTP_PROXY)?,
            https: parse(HTTPS_PROXY)?,
            all: parse(ALL_PROXY)?,
            no_proxy: env.get(NO_PROXY).and_then(NoProxy::parse),
        };

        for (name, endpoint) in [(HTTP_PROXY, &config.http), (HTTPS_PROXY, &config.https)] {
            let stray_socks = endpoint.as_ref().is_some_and(ProxyEndpoint::is_socks);
            if stray_socks && config.socks_endpoint().is_none() {
                tracing::warn!(
                    target: "egress::proxy",
                    variable = name,
                    "SOCKS proxy outside ALL_PROXY; sockets are not tunneled"
                );
            }
        }

        tracing::debug!(
            target: "egress::proxy",
            http = ?config.http.as_ref().map(ToString::to_string),
            https = ?config.https.as_ref().map(ToString::to_string),
            all = ?config.all.as_ref().map(ToString::to_string),
            "resolved proxy configuration"
        );

        Ok(config)
    }

    /// Snapshot the process environment and resolve it.
    ///
    /// # Errors
    ///
    /// See [`ProxyConfig::from_env`].
    pub fn from_process_env() -> Result<Self> {
        Self::from_env(&EnvSnapshot::from_process())
    }

    /// Build a config directly from endpoints, bypassing the environment
    #[must_use]
    pub fn with_endpoint(mut self, class: TrafficClass, endpoint: ProxyEndpoint) -> Self {
        match class {
            TrafficClass::Http => self.http = Some(endpoint),
            TrafficClass::Https => self.https = Some(endpoint),
            TrafficClass::All => self.all = Some(endpoint),
        }
        self
    }

    /// Endpoint set for exactly this traffic class
    #[must_use]
    pub fn endpoint(&self, class: TrafficClass) -> Option<&ProxyEndpoint> {
        match class {
            TrafficClass::Http => self.http.as_ref(),
            TrafficClass::Https => self.https.as_ref(),
            TrafficClass::All => self.all.as_ref(),
        }
    }

    /// The SOCKS endpoint that drives global socket substitution.
    ///
    /// Only `ALL_PROXY` with a `socks5`/`socks5h` scheme qualifies.
    #[must_use]
    pub fn socks_endpoint(&self) -> Option<&ProxyEndpoint> {
        self.all.as_ref().filter(|endpoint| endpoint.is_socks())
    }

    /// Endpoint governing a traffic class: a SOCKS `ALL_PROXY` governs every
    /// class, otherwise the class's own variable does.
    #[must_use]
    pub fn governing(&self, class: TrafficClass) -> Option<&ProxyEndpoint> {
        self.socks_endpoint().or_else(|| self.endpoint(class))
    }

    /// Proxy the HTTP client is expected to dial for `target`.
    ///
    /// Mirrors the client's native environment handling: `HTTP_PROXY` for
    /// `http` targets, `HTTPS_PROXY` for `https` targets, an HTTP-family
    /// `ALL_PROXY` as fallback for both, and `NO_PROXY` exclusions. SOCKS
    /// endpoints never appear here; they are applied at the socket layer.
    #[must_use]
    pub fn http_proxy_for(&self, target: &Url) -> Option<&ProxyEndpoint> {
        let host = match target.host()? {
            Host::Domain(domain) => domain.to_owned(),
            Host::Ipv4(ip) => ip.to_string(),
            Host::Ipv6(ip) => ip.to_string(),
        };
        if self.no_proxy.as_ref().is_some_and(|rules| rules.matches(&host)) {
            return None;
        }

        let fallback = || self.all.as_ref().filter(|endpoint| endpoint.scheme().is_http());
        let chosen = match target.scheme() {
            "http" => self.http.as_ref().or_else(fallback),
            "https" => self.https.as_ref().or_else(fallback),
            _ => None,
        };
        chosen.filter(|endpoint| endpoint.scheme().is_http())
    }

    /// `NO_PROXY` rules, if any were set
    #[must_use]
    pub fn no_proxy(&self) -> Option<&NoProxy> {
        self.no_proxy.as_ref()
    }

    /// True when no proxy variable was set
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.http.is_none() && self.https.is_none() && self.all.is_none()
    }
}
