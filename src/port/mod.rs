//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! Ports define the extension points in the hexagonal architecture.
//! They are traits that adapters implement to integrate with the hosted
//! backend (auth provider, Postgres tables, the ledger procedure).
//!
//! # Architecture
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │      Application        │
//!     ┌──────────────┤  Domain + Port          ├──────────────┐
//!     │              └─────────────────────────┘              │
//!     │                         │                             │
//!     ▼                         ▼                             ▼
//! ┌─────────┐            ┌─────────────┐              ┌───────────┐
//! │  Auth   │            │ Profile /   │              │  Audit    │
//! │ Adapter │            │ Ledger Store│              │  Sink     │
//! └─────────┘            └─────────────┘              └───────────┘
//! ```

pub mod outbound;

pub use outbound::{
    AuditSink, AuthUser, Backend, BackendProbe, LedgerStore, ProfileStore, TokenVerifier,
};
