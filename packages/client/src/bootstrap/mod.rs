//! Startup sequencing: transport before credentials

pub mod credentials;
pub mod sequencer;

pub use credentials::{CredentialError, CredentialManager};
pub use sequencer::{
    BootstrapError, BootstrapPhase, BootstrapReport, Sequencer,
    initialize_transport_and_credentials,
};
