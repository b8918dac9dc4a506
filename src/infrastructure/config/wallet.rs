//! Wallet view configuration.

use serde::Deserialize;

/// Settings for `GET /api/tsb/wallet`.
#[derive(Debug, Clone, Deserialize)]
pub struct WalletConfig {
    /// Number of recent transactions returned with the balance.
    #[serde(default = "default_recent_transactions")]
    pub recent_transactions: u32,
}

const fn default_recent_transactions() -> u32 {
    20
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            recent_transactions: default_recent_transactions(),
        }
    }
}
