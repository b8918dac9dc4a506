//! Outbound ports (driven side): interfaces implemented by outbound adapters.
//!
//! These contracts describe the hosted backend: token verification, profile
//! and ledger storage, the audit log, and a reachability probe.

pub mod audit;
pub mod auth;
pub mod health;
pub mod store;

use std::sync::Arc;

pub use audit::AuditSink;
pub use auth::{AuthUser, TokenVerifier};
pub use health::BackendProbe;
pub use store::{LedgerStore, ProfileStore};

/// One backend seen through every outbound port.
///
/// Adapters usually implement all ports on a single type; [`Backend::from_shared`]
/// wires such a type into each slot.
#[derive(Clone)]
pub struct Backend {
    pub verifier: Arc<dyn TokenVerifier>,
    pub profiles: Arc<dyn ProfileStore>,
    pub ledger: Arc<dyn LedgerStore>,
    pub audit: Arc<dyn AuditSink>,
    pub probe: Arc<dyn BackendProbe>,
}

impl Backend {
    pub fn from_shared<B>(backend: Arc<B>) -> Self
    where
        B: TokenVerifier + ProfileStore + LedgerStore + AuditSink + BackendProbe + 'static,
    {
        Self {
            verifier: backend.clone(),
            profiles: backend.clone(),
            ledger: backend.clone(),
            audit: backend.clone(),
            probe: backend,
        }
    }
}
