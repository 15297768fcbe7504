//! Fluent entry point over proxy resolution, installation and bootstrap

use egress_client::bootstrap::{BootstrapError, BootstrapReport, CredentialManager, Sequencer};
use egress_client::proxy::{EnvSnapshot, ProxyConfig, ProxyEndpoint};
use egress_client::transport::{GlobalTransportState, TransportInstaller, global_installer};
use egress_client::Result;
use url::Url;

/// Where proxy variables are read from
#[derive(Debug, Clone)]
enum EnvSource {
    Process,
    Snapshot(EnvSnapshot),
}

/// Builder over one installer and one environment source.
///
/// `Egress::new()` targets the process-wide installer and the process
/// environment; installing through it affects every socket the process opens
/// afterwards.
#[derive(Debug, Clone)]
pub struct Egress<'a> {
    installer: &'a TransportInstaller,
    env: EnvSource,
}

impl Default for Egress<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl Egress<'static> {
    /// Process-wide installer, process environment
    #[must_use]
    pub fn new() -> Self {
        Self {
            installer: global_installer(),
            env: EnvSource::Process,
        }
    }
}

impl<'a> Egress<'a> {
    /// Use another installer, e.g. an isolated one in tests
    #[must_use]
    pub fn installer<'b>(self, installer: &'b TransportInstaller) -> Egress<'b> {
        Egress {
            installer,
            env: self.env,
        }
    }

    /// Read proxy variables from `env` instead of the process environment
    #[must_use]
    pub fn env(mut self, env: EnvSnapshot) -> Self {
        self.env = EnvSource::Snapshot(env);
        self
    }

    /// Override one variable on top of the current source
    #[must_use]
    pub fn var(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let base = match self.env {
            EnvSource::Process => EnvSnapshot::from_process(),
            EnvSource::Snapshot(env) => env,
        };
        self.env = EnvSource::Snapshot(base.with_var(key, value));
        self
    }

    fn snapshot(&self) -> EnvSnapshot {
        match &self.env {
            EnvSource::Process => EnvSnapshot::from_process(),
            EnvSource::Snapshot(env) => env.clone(),
        }
    }

    /// Resolve the proxy configuration without installing anything
    ///
    /// # Errors
    ///
    /// Fails when a proxy variable holds a malformed URL.
    pub fn resolve(&self) -> Result<ProxyConfig> {
        ProxyConfig::from_env(&self.snapshot())
    }

    /// Resolve and install
    ///
    /// # Errors
    ///
    /// Fails on a malformed proxy URL, in which case nothing is installed, or
    /// when the installer rejects the SOCKS endpoint.
    pub fn install(&self) -> Result<GlobalTransportState> {
        let config = self.resolve()?;
        self.installer.install(&config)
    }

    /// Resolve, install, then prepare credentials
    ///
    /// # Errors
    ///
    /// See [`Sequencer::run`].
    pub async fn bootstrap<C>(
        &self,
        credentials: &C,
    ) -> std::result::Result<BootstrapReport<C::Credentials>, BootstrapError>
    where
        C: CredentialManager,
    {
        Sequencer::new(self.installer)
            .with_env(self.snapshot())
            .run(credentials)
            .await
    }

    /// HTTP proxy the HTTP client is expected to dial for `target`
    ///
    /// # Errors
    ///
    /// Fails when a proxy variable is malformed.
    pub fn http_proxy_for(&self, target: &Url) -> Result<Option<ProxyEndpoint>> {
        let config = self.resolve()?;
        tracing::trace!(target: "egress::api", url = %target, "looking up HTTP proxy");
        Ok(config.http_proxy_for(target).cloned())
    }

    /// Current state of this builder's installer
    #[must_use]
    pub fn state(&self) -> GlobalTransportState {
        self.installer.state()
    }
}
