//! Process-wide transport state

use serde::Serialize;

use crate::proxy::ProxyEndpoint;

/// Which socket implementation is bound as the default connector.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", content = "proxy", rename_all = "snake_case")]
pub enum GlobalTransportState {
    /// Platform connector; sockets dial their targets directly
    #[default]
    Direct,
    /// Every unqualified socket is tunneled through this SOCKS endpoint
    SocksTunneled(ProxyEndpoint),
}

impl GlobalTransportState {
    #[inline]
    #[must_use]
    pub fn is_direct(&self) -> bool {
        matches!(self, Self::Direct)
    }

    #[inline]
    #[must_use]
    pub fn is_tunneled(&self) -> bool {
        matches!(self, Self::SocksTunneled(_))
    }

    /// Active SOCKS endpoint, if tunneled
    #[must_use]
    pub fn endpoint(&self) -> Option<&ProxyEndpoint> {
        match self {
            Self::Direct => None,
            Self::SocksTunneled(endpoint) => Some(endpoint),
        }
    }
}
