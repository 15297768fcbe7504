//! Credential manager collaborator
//!
//! The bootstrap only needs to refresh, count and pick credentials; how they
//! are loaded is up to the implementation.

use std::future::Future;

/// Error type credential managers report.
pub type CredentialError = Box<dyn std::error::Error + Send + Sync>;

/// Source of service credentials, consulted only after the transport is
/// installed.
pub trait CredentialManager: Send + Sync {
    /// Credential handle passed on to AI client construction
    type Credentials: Send;

    /// Reload the credential list. `Ok(false)` means nothing was found.
    fn refresh_credentials_list(
        &self,
    ) -> impl Future<Output = Result<bool, CredentialError>> + Send;

    /// Number of credentials currently loaded
    fn total_credentials(&self) -> usize;

    /// Pick one credential and the project it belongs to
    fn random_credentials(&self) -> Option<(Self::Credentials, String)>;
}
