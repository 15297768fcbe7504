//! Transport-first bootstrap
//!
//! Resolves proxy settings, installs the transport, and only then lets the
//! credential manager touch the network. A credential failure does not undo
//! the installed transport: the transport reflects the environment, not a
//! single bootstrap attempt.

use super::credentials::CredentialManager;
use crate::error::{self, Error};
use crate::proxy::{EnvSnapshot, ProxyConfig};
use crate::transport::{GlobalTransportState, TransportInstaller, global_installer};

/// Progress of one bootstrap run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum BootstrapPhase {
    Unconfigured,
    /// Proxy configuration resolved from the environment
    Resolved,
    /// Transport installed; network clients may now be built
    Installed,
    Ready,
}

/// A bootstrap failure and the last phase completed before it.
#[derive(Debug, thiserror::Error)]
#[error("bootstrap stopped after phase {phase:?}: {source}")]
pub struct BootstrapError {
    pub phase: BootstrapPhase,
    #[source]
    pub source: Error,
}

impl BootstrapError {
    fn new(phase: BootstrapPhase, source: Error) -> Self {
        Self { phase, source }
    }
}

/// Outcome of a successful bootstrap.
#[derive(Debug)]
pub struct BootstrapReport<T> {
    pub transport: GlobalTransportState,
    pub total_credentials: usize,
    pub credentials: T,
    pub project_id: String,
}

/// Runs the bootstrap against a given installer and environment.
#[derive(Debug)]
pub struct Sequencer<'a> {
    installer: &'a TransportInstaller,
    env: Option<EnvSnapshot>,
    phase: BootstrapPhase,
}

impl<'a> Sequencer<'a> {
    #[must_use]
    pub fn new(installer: &'a TransportInstaller) -> Self {
        Self {
            installer,
            env: None,
            phase: BootstrapPhase::Unconfigured,
        }
    }

    /// Resolve from `env` instead of the process environment
    #[must_use]
    pub fn with_env(mut self, env: EnvSnapshot) -> Self {
        self.env = Some(env);
        self
    }

    /// Last phase this sequencer completed
    #[must_use]
    pub fn phase(&self) -> BootstrapPhase {
        self.phase
    }

    /// Resolve, install, then prepare credentials.
    ///
    /// Every call starts again from [`BootstrapPhase::Unconfigured`], so a
    /// config reload re-resolves the environment and re-installs following
    /// the installer's idempotence rules.
    ///
    /// # Errors
    ///
    /// A malformed proxy URL or a rejected installation stops the run before
    /// any credential call. Credential failures stop it after
    /// [`BootstrapPhase::Installed`] with the transport left installed.
    pub async fn run<C>(
        &mut self,
        credentials: &C,
    ) -> Result<BootstrapReport<C::Credentials>, BootstrapError>
    where
        C: CredentialManager,
    {
        self.phase = BootstrapPhase::Unconfigured;

        let env = self.env.clone().unwrap_or_else(EnvSnapshot::from_process);
        let config = ProxyConfig::from_env(&env).map_err(|e| self.fail(e))?;
        self.phase = BootstrapPhase::Resolved;

        let transport = self.installer.install(&config).map_err(|e| self.fail(e))?;
        self.phase = BootstrapPhase::Installed;
        tracing::debug!(
            target: "egress::bootstrap",
            transport = ?transport,
            "transport ready; loading credentials"
        );

        let found = credentials
            .refresh_credentials_list()
            .await
            .map_err(|e| self.fail(error::credentials(e)))?;
        let total = credentials.total_credentials();
        if !found || total == 0 {
            return Err(self.fail(error::credentials("no credentials available")));
        }

        let (picked, project_id) = credentials.random_credentials().ok_or_else(|| {
            self.fail(error::credentials("credential manager returned no credentials"))
        })?;

        self.phase = BootstrapPhase::Ready;
        tracing::info!(
            target: "egress::bootstrap",
            total_credentials = total,
            project_id = %project_id,
            tunneled = transport.is_tunneled(),
            "bootstrap complete"
        );

        Ok(BootstrapReport {
            transport,
            total_credentials: total,
            credentials: picked,
            project_id,
        })
    }

    fn fail(&self, source: Error) -> BootstrapError {
        tracing::error!(
            target: "egress::bootstrap",
            phase = ?self.phase,
            error = %source,
            "bootstrap failed"
        );
        BootstrapError::new(self.phase, source)
    }
}

/// Bootstrap against the process environment and the process-wide installer.
///
/// # Errors
///
/// See [`Sequencer::run`].
pub async fn initialize_transport_and_credentials<C>(
    credentials: &C,
) -> Result<BootstrapReport<C::Credentials>, BootstrapError>
where
    C: CredentialManager,
{
    Sequencer::new(global_installer()).run(credentials).await
}
