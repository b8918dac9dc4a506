//! Persistence ports for profiles and the TSB ledger.

use async_trait::async_trait;

use crate::domain::{
    AppliedTransaction, LedgerEntry, Page, Profile, Role, TxId, TxRequest, UserId, Wallet,
};
use crate::error::Result;

/// Storage operations for `profiles`.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Get a profile by user ID.
    async fn get(&self, id: &UserId) -> Result<Option<Profile>>;

    /// List profiles, newest first, optionally filtered by a search term
    /// matched against username and Pi uid.
    async fn list(&self, search: Option<&str>, page: Page) -> Result<Vec<Profile>>;

    /// Overwrite a profile's role. Returns the updated row, or `None` when
    /// the profile does not exist.
    async fn set_role(&self, id: &UserId, role: Role) -> Result<Option<Profile>>;
}

/// Storage operations for `tsb_wallets` and `tsb_transactions`.
///
/// Balance mutation is only reachable through [`LedgerStore::apply`], which
/// must be atomic on the implementation side.
#[async_trait]
pub trait LedgerStore: Send + Sync {
    /// Apply one transaction and return the new balance.
    async fn apply(&self, request: &TxRequest) -> Result<AppliedTransaction>;

    /// Get a transaction by ID.
    async fn get(&self, id: &TxId) -> Result<Option<LedgerEntry>>;

    /// Find the rollback transaction referencing `id`, if any.
    async fn find_reversal(&self, id: &TxId) -> Result<Option<LedgerEntry>>;

    /// List transactions, newest first, optionally for one user.
    async fn list(&self, user: Option<&UserId>, page: Page) -> Result<Vec<LedgerEntry>>;

    /// Get a user's wallet row.
    async fn wallet(&self, user: &UserId) -> Result<Option<Wallet>>;
}
