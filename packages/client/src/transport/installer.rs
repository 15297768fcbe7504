//! Transport installation
//!
//! The installer owns the process's connector binding: the state, connector
//! and SOCKS registration that unqualified socket creation reads. Installing a SOCKS
//! `ALL_PROXY` swaps the binding to a SOCKS-aware connector; installing a
//! config without one swaps the original platform connector back.
//!
//! The binding is a single [`ArcSwap`], so readers load it without locking
//! and always see a matching state, connector and registration. Writers are
//! serialized by a mutex.

use std::fmt;
use std::sync::{Arc, Mutex, OnceLock, PoisonError};

use arc_swap::ArcSwap;

use super::connector::{DirectConnector, SocketConnector};
use super::facility::{SocksFacility, SocksRegistration};
use super::state::GlobalTransportState;
use crate::error::{self, Result};
use crate::proxy::{ProxyConfig, ProxyEndpoint};

/// One consistent view of the installed transport.
#[derive(Debug)]
pub struct TransportBinding {
    state: GlobalTransportState,
    connector: Arc<dyn SocketConnector>,
    registration: Option<SocksRegistration>,
}

impl TransportBinding {
    fn direct(platform: &Arc<dyn SocketConnector>) -> Self {
        Self {
            state: GlobalTransportState::Direct,
            connector: Arc::clone(platform),
            registration: None,
        }
    }

    #[must_use]
    pub fn state(&self) -> &GlobalTransportState {
        &self.state
    }

    #[must_use]
    pub fn connector(&self) -> &Arc<dyn SocketConnector> {
        &self.connector
    }

    /// SOCKS default proxy in effect; `None` exactly when the state is direct
    #[must_use]
    pub fn registration(&self) -> Option<&SocksRegistration> {
        self.registration.as_ref()
    }
}

/// Applies a [`ProxyConfig`] to a connector binding.
pub struct TransportInstaller {
    facility: SocksFacility,
    platform: Arc<dyn SocketConnector>,
    binding: ArcSwap<TransportBinding>,
    writer: Mutex<()>,
}

impl Default for TransportInstaller {
    fn default() -> Self {
        Self::new()
    }
}

impl TransportInstaller {
    /// An installer whose platform connector is a [`DirectConnector`].
    ///
    /// This instance is independent of the process-wide one returned by
    /// [`global_installer`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_platform(Arc::new(DirectConnector::default()))
    }

    /// An installer that restores `platform` whenever no SOCKS proxy applies
    #[must_use]
    pub fn with_platform(platform: Arc<dyn SocketConnector>) -> Self {
        let binding = TransportBinding::direct(&platform);
        Self {
            facility: SocksFacility::new(),
            platform,
            binding: ArcSwap::from_pointee(binding),
            writer: Mutex::new(()),
        }
    }

    /// Apply `config` to the connector binding.
    ///
    /// With a SOCKS `ALL_PROXY`, the endpoint is registered as the facility's
    /// default proxy and a SOCKS connector bound to it becomes the default
    /// connector. Installing the endpoint that is already active changes
    /// nothing. Without a SOCKS endpoint, any previous installation is undone
    /// and the platform connector captured at construction is bound again.
    ///
    /// # Errors
    ///
    /// Returns a transport-install error when SOCKS support is unavailable or
    /// the registration rejects the endpoint. The binding and registration
    /// are left as they were before the call.
    pub fn install(&self, config: &ProxyConfig) -> Result<GlobalTransportState> {
        let _writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);

        match config.socks_endpoint() {
            Some(endpoint) => self.tunnel(endpoint),
            None => Ok(self.direct()),
        }
    }

    /// Undo any SOCKS installation.
    pub fn restore(&self) -> GlobalTransportState {
        let _writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        self.direct()
    }

    fn tunnel(&self, endpoint: &ProxyEndpoint) -> Result<GlobalTransportState> {
        let current = self.binding.load();
        if current.state.endpoint() == Some(endpoint) {
            tracing::debug!(
                target: "egress::transport",
                proxy = %endpoint,
                "SOCKS transport already installed"
            );
            return Ok(current.state.clone());
        }

        let previous = self.facility.default_proxy();
        let registration = SocksRegistration::from_endpoint(endpoint);
        let connector = self
            .facility
            .set_default_proxy(registration.clone())
            .and_then(|()| self.facility.connector())
            .map_err(|e| {
                match previous {
                    Some(previous) => {
                        // Put back a registration that was accepted before.
                        if let Err(rollback) = self.facility.set_default_proxy(previous) {
                            tracing::warn!(
                                target: "egress::transport",
                                error = %rollback,
                                "could not restore the previous SOCKS registration"
                            );
                            self.facility.clear_default_proxy();
                        }
                    }
                    None => self.facility.clear_default_proxy(),
                }
                tracing::error!(
                    target: "egress::transport",
                    proxy = %endpoint,
                    error = %e,
                    "SOCKS transport installation failed"
                );
                error::transport_install(e).with_proxy_url(endpoint.to_string())
            })?;

        let state = GlobalTransportState::SocksTunneled(endpoint.clone());
        self.binding.store(Arc::new(TransportBinding {
            state: state.clone(),
            connector,
            registration: Some(registration),
        }));

        tracing::info!(
            target: "egress::transport",
            proxy = %endpoint,
            rdns = endpoint.rdns(),
            "installed SOCKS transport; all new sockets in this process are tunneled"
        );
        Ok(state)
    }

    fn direct(&self) -> GlobalTransportState {
        if self.binding.load().state.is_direct() {
            tracing::debug!(target: "egress::transport", "direct transport already installed");
            return GlobalTransportState::Direct;
        }

        self.binding.store(Arc::new(TransportBinding::direct(&self.platform)));
        self.facility.clear_default_proxy();

        tracing::info!(
            target: "egress::transport",
            "restored platform socket connector"
        );
        GlobalTransportState::Direct
    }

    /// Current transport state
    #[must_use]
    pub fn state(&self) -> GlobalTransportState {
        self.binding.load().state.clone()
    }

    /// Connector that unqualified socket creation should use
    #[must_use]
    pub fn default_connector(&self) -> Arc<dyn SocketConnector> {
        Arc::clone(&self.binding.load().connector)
    }

    /// State, connector and registration read from one binding load
    #[must_use]
    pub fn current(&self) -> Arc<TransportBinding> {
        self.binding.load_full()
    }

    /// The platform connector captured at construction
    #[must_use]
    pub fn platform_connector(&self) -> Arc<dyn SocketConnector> {
        Arc::clone(&self.platform)
    }

    /// True when the bound connector is the very platform connector instance
    #[must_use]
    pub fn is_platform_default(&self) -> bool {
        std::ptr::addr_eq(
            Arc::as_ptr(&self.binding.load().connector),
            Arc::as_ptr(&self.platform),
        )
    }

    /// Default SOCKS proxy of the installed binding
    #[must_use]
    pub fn registered_proxy(&self) -> Option<SocksRegistration> {
        self.binding.load().registration.clone()
    }
}

impl fmt::Debug for TransportInstaller {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let binding = self.binding.load();
        f.debug_struct("TransportInstaller")
            .field("state", &binding.state)
            .field("connector", &binding.connector)
            .field("registration", &binding.registration)
            .field("platform", &self.platform)
            .finish()
    }
}

static GLOBAL_INSTALLER: OnceLock<TransportInstaller> = OnceLock::new();

/// The process-wide installer.
///
/// Installing through this instance is a deliberate global effect: every
/// socket later opened through [`super::connect`] or
/// [`super::default_connector`] in this process, by any component, uses the
/// connector it binds.
pub fn global_installer() -> &'static TransportInstaller {
    GLOBAL_INSTALLER.get_or_init(TransportInstaller::new)
}
