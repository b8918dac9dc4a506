//! tsbgate - API gateway for a Pi Network marketplace.
//!
//! The gateway fronts a Supabase project and exposes two JSON surfaces:
//!
//! - **`/api/admin`** - role-guarded user management, ledger adjustments,
//!   rollbacks and audit log browsing
//! - **`/api/tsb`** - the caller's own TSB wallet and transaction history
//!
//! Every balance change goes through the `tsb_apply_tx` procedure. A
//! rollback never edits history; it applies a second transaction with the
//! opposite sign and links it to the original through `ref_id`.
//!
//! # Architecture
//!
//! - [`domain`] - Backend-agnostic types: roles, ledger entries, audit entries
//! - [`port`] - Outbound traits the application depends on
//! - [`application`] - Access guard and the ledger, user and wallet services
//! - [`adapter`] - HTTP API, CLI, and the Supabase and in-memory backends
//! - [`infrastructure`] - Configuration and service wiring
//! - [`error`] - Error types for the crate
//!
//! # Example
//!
//! ```no_run
//! use tsbgate::infrastructure::bootstrap::build_state;
//! use tsbgate::infrastructure::config::settings::Config;
//!
//! # async fn run() -> tsbgate::error::Result<()> {
//! let config = Config::load("config.toml")?;
//! let state = build_state(&config)?;
//! tsbgate::adapter::inbound::http::serve(state, &config.server).await
//! # }
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
