//! Backend-agnostic domain types: identities, roles, ledger rows, audit rows.

pub mod audit;
pub mod error;
pub mod id;
pub mod ledger;
pub mod page;
pub mod profile;
pub mod role;

pub use audit::{AuditAction, AuditEntry};
pub use error::DomainError;
pub use id::{TxId, UserId};
pub use ledger::{AppliedTransaction, LedgerEntry, TxKind, TxRequest, Wallet};
pub use page::Page;
pub use profile::Profile;
pub use role::Role;
