//! # egress client
//!
//! Resolves proxy environment variables into the transport an AI service
//! client process uses, and installs it before any network client exists.
//!
//! ## Two integration paths
//!
//! - **HTTP(S) proxies** (`HTTP_PROXY`, `HTTPS_PROXY`, an HTTP `ALL_PROXY`) are
//!   left to the HTTP client, which applies them per request. Nothing global
//!   changes.
//! - **SOCKS proxies** (`ALL_PROXY=socks5://…` or `socks5h://…`) replace the
//!   process-wide default socket connector. Every socket opened afterwards
//!   through [`transport::connect`] is tunneled, whichever component opens it.
//!
//! ## Usage
//!
//! ```no_run
//! use egress_client::prelude::*;
//!
//! # async fn run<C: CredentialManager>(creds: &C) -> std::result::Result<(), BootstrapError> {
//! // Resolve the environment, install the transport, then load credentials.
//! let report = initialize_transport_and_credentials(creds).await?;
//! if report.transport.is_tunneled() {
//!     // sockets from here on go through the SOCKS proxy
//! }
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(clippy::all)]

pub mod bootstrap;
pub mod error;
pub mod proxy;
pub mod transport;

pub mod prelude;

pub use crate::error::{Error, Result};
