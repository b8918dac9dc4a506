//! Caller-facing wallet views.

use std::sync::Arc;

use serde::Serialize;

use super::guard::Caller;
use crate::domain::{LedgerEntry, Page, Wallet};
use crate::error::Result;
use crate::port::LedgerStore;

/// Balance plus the most recent transactions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WalletOverview {
    pub wallet: Wallet,
    pub recent: Vec<LedgerEntry>,
}

#[derive(Clone)]
pub struct WalletService {
    store: Arc<dyn LedgerStore>,
    recent_limit: u32,
}

impl WalletService {
    #[must_use]
    pub fn new(store: Arc<dyn LedgerStore>, recent_limit: u32) -> Self {
        Self {
            store,
            recent_limit,
        }
    }

    /// The caller's wallet. A missing wallet row reads as a zero balance.
    pub async fn overview(&self, caller: &Caller) -> Result<WalletOverview> {
        let wallet = self
            .store
            .wallet(caller.id())
            .await?
            .unwrap_or_else(|| Wallet::empty(caller.id().clone()));
        let recent = self
            .store
            .list(Some(caller.id()), Page::new(Some(self.recent_limit), None))
            .await?;
        Ok(WalletOverview { wallet, recent })
    }

    /// The caller's own transaction history.
    pub async fn transactions(&self, caller: &Caller, page: Page) -> Result<Vec<LedgerEntry>> {
        self.store.list(Some(caller.id()), page).await
    }
}
