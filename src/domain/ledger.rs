//! TSB wallet ledger types.
//!
//! Balances live in `tsb_wallets` and every movement is a row in
//! `tsb_transactions`. The arithmetic itself happens in the backend's
//! `tsb_apply_tx` procedure; this module only describes requests and results
//! and the reversal rule used by root-admin rollbacks.

use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::id::{TxId, UserId};

/// Maximum length of a free-text transaction reason.
pub const MAX_REASON_LEN: usize = 500;

/// Transaction category stored in `tsb_transactions.kind`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TxKind {
    Credit,
    Debit,
    Purchase,
    Reward,
    Refund,
    /// Manual root-admin credit or debit.
    Adjustment,
    /// Reversal of an earlier transaction.
    Rollback,
    #[serde(other)]
    Other,
}

impl TxKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Credit => "credit",
            Self::Debit => "debit",
            Self::Purchase => "purchase",
            Self::Reward => "reward",
            Self::Refund => "refund",
            Self::Adjustment => "adjustment",
            Self::Rollback => "rollback",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for TxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A row of `tsb_wallets`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wallet {
    pub user_id: UserId,
    pub balance: Decimal,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Wallet {
    /// Wallet view for a user that has no row yet.
    #[must_use]
    pub fn empty(user_id: UserId) -> Self {
        Self {
            user_id,
            balance: Decimal::ZERO,
            updated_at: None,
        }
    }
}

/// A row of `tsb_transactions`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub id: TxId,
    pub user_id: UserId,
    /// Signed amount: positive credits the wallet, negative debits it.
    pub amount: Decimal,
    pub kind: TxKind,
    #[serde(default)]
    pub reason: Option<String>,
    /// Free-form reference; for rollbacks, the id of the reversed transaction.
    #[serde(default)]
    pub ref_id: Option<String>,
    #[serde(default)]
    pub actor_id: Option<UserId>,
    #[serde(default)]
    pub balance_after: Option<Decimal>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl LedgerEntry {
    /// Rollbacks are terminal: reversing one would re-apply the original.
    #[must_use]
    pub fn is_reversible(&self) -> bool {
        self.kind != TxKind::Rollback
    }

    /// Build the request that reverses this entry.
    ///
    /// Same user, amount with the sign flipped, kind `rollback`, and `ref_id`
    /// pointing back at this entry.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError`] if the stored amount is zero or the reason is
    /// too long.
    pub fn reversal(
        &self,
        actor: &UserId,
        reason: Option<String>,
    ) -> Result<TxRequest, DomainError> {
        let reason = reason.unwrap_or_else(|| format!("rollback of {}", self.id));
        TxRequest::try_new(self.user_id.clone(), -self.amount, TxKind::Rollback)?
            .with_reason(reason)?
            .with_ref(self.id.as_str())
            .with_actor(actor.clone())
            .validated()
    }
}

/// Validated input for one ledger movement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxRequest {
    user_id: UserId,
    amount: Decimal,
    kind: TxKind,
    reason: Option<String>,
    ref_id: Option<String>,
    actor_id: Option<UserId>,
}

impl TxRequest {
    /// Create a request, rejecting a blank user or a zero amount.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::EmptyField`] or [`DomainError::ZeroAmount`].
    pub fn try_new(user_id: UserId, amount: Decimal, kind: TxKind) -> Result<Self, DomainError> {
        let request = Self {
            user_id,
            amount,
            kind,
            reason: None,
            ref_id: None,
            actor_id: None,
        };
        request.validated()
    }

    /// Attach a reason; blank reasons are dropped.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::TooLong`] past [`MAX_REASON_LEN`] characters.
    pub fn with_reason(mut self, reason: impl Into<String>) -> Result<Self, DomainError> {
        let reason = reason.into();
        let trimmed = reason.trim();
        if trimmed.chars().count() > MAX_REASON_LEN {
            return Err(DomainError::TooLong {
                field: "reason",
                max: MAX_REASON_LEN,
            });
        }
        self.reason = (!trimmed.is_empty()).then(|| trimmed.to_string());
        Ok(self)
    }

    #[must_use]
    pub fn with_ref(mut self, ref_id: impl Into<String>) -> Self {
        self.ref_id = Some(ref_id.into());
        self
    }

    #[must_use]
    pub fn with_actor(mut self, actor: UserId) -> Self {
        self.actor_id = Some(actor);
        self
    }

    fn validated(self) -> Result<Self, DomainError> {
        if self.user_id.is_blank() {
            return Err(DomainError::EmptyField { field: "user_id" });
        }
        if self.amount.is_zero() {
            return Err(DomainError::ZeroAmount);
        }
        Ok(self)
    }

    #[must_use]
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    #[must_use]
    pub fn amount(&self) -> Decimal {
        self.amount
    }

    #[must_use]
    pub fn kind(&self) -> TxKind {
        self.kind
    }

    #[must_use]
    pub fn reason(&self) -> Option<&str> {
        self.reason.as_deref()
    }

    #[must_use]
    pub fn ref_id(&self) -> Option<&str> {
        self.ref_id.as_deref()
    }

    #[must_use]
    pub fn actor_id(&self) -> Option<&UserId> {
        self.actor_id.as_ref()
    }
}

/// Result of a successful `tsb_apply_tx` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppliedTransaction {
    pub tx_id: TxId,
    /// Wallet balance after the transaction.
    pub balance: Decimal,
}
