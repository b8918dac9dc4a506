//! Application services (use cases).
//!
//! These services orchestrate domain logic and coordinate adapters
//! to implement the gateway's use cases.

pub mod audit;
pub mod guard;
pub mod ledger;
pub mod state;
pub mod users;
pub mod wallet;

pub use audit::AuditTrail;
pub use guard::{AccessGuard, Caller};
pub use ledger::{LedgerService, RollbackOutcome};
pub use state::{AppState, ServiceSettings};
pub use users::UserAdminService;
pub use wallet::{WalletOverview, WalletService};
