//! TSB ledger use cases: apply, root-admin adjust, root-admin rollback.
//!
//! Balance arithmetic is owned by the backend procedure behind
//! [`LedgerStore::apply`]. A rollback is a second transaction for the same
//! user with the amount negated and `ref_id` pointing at the original.

use std::sync::Arc;

use rust_decimal::Decimal;
use serde_json::json;
use tracing::info;

use super::audit::AuditTrail;
use super::guard::Caller;
use crate::domain::error::DomainError;
use crate::domain::{
    AppliedTransaction, AuditAction, AuditEntry, LedgerEntry, Page, TxId, TxKind, TxRequest,
    UserId,
};
use crate::error::{LedgerError, Result};
use crate::port::LedgerStore;

/// Result of a rollback: the new reversing transaction and the entry it reversed.
#[derive(Debug, Clone, PartialEq)]
pub struct RollbackOutcome {
    pub transaction: AppliedTransaction,
    pub rolled_back: LedgerEntry,
}

#[derive(Clone)]
pub struct LedgerService {
    store: Arc<dyn LedgerStore>,
    audit: AuditTrail,
}

impl LedgerService {
    #[must_use]
    pub fn new(store: Arc<dyn LedgerStore>, audit: AuditTrail) -> Self {
        Self { store, audit }
    }

    /// Apply one validated transaction through the backend procedure.
    pub async fn apply_tsb_transaction(&self, request: &TxRequest) -> Result<AppliedTransaction> {
        info!(
            user = %request.user_id(),
            amount = %request.amount(),
            kind = %request.kind(),
            ref_id = ?request.ref_id(),
            "Applying ledger transaction"
        );
        let applied = self.store.apply(request).await?;
        info!(
            tx_id = %applied.tx_id,
            balance = %applied.balance,
            "Ledger transaction applied"
        );
        Ok(applied)
    }

    /// Reverse transaction `tx_id`. Root admin only.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::TxNotFound`] for an unknown id
    /// - [`LedgerError::NotReversible`] when the target is itself a rollback
    /// - [`LedgerError::AlreadyRolledBack`] when a rollback already references it
    pub async fn rollback(
        &self,
        caller: &Caller,
        tx_id: &TxId,
        reason: Option<String>,
    ) -> Result<RollbackOutcome> {
        caller.ensure_root()?;

        let original = self
            .store
            .get(tx_id)
            .await?
            .ok_or_else(|| LedgerError::TxNotFound(tx_id.clone()))?;

        if !original.is_reversible() {
            return Err(LedgerError::NotReversible(tx_id.clone()).into());
        }
        if let Some(existing) = self.store.find_reversal(tx_id).await? {
            return Err(LedgerError::AlreadyRolledBack {
                tx_id: tx_id.clone(),
                rollback_id: existing.id,
            }
            .into());
        }

        let request = original.reversal(caller.id(), reason)?;
        let transaction = self.apply_tsb_transaction(&request).await?;

        self.audit
            .record(
                AuditEntry::new(
                    caller.id().clone(),
                    AuditAction::LedgerRollback,
                    "tsb_transaction",
                )
                .target(tx_id.as_str())
                .detail(json!({
                    "user_id": original.user_id,
                    "original_amount": original.amount,
                    "reversal_amount": request.amount(),
                    "rollback_tx_id": transaction.tx_id,
                    "balance": transaction.balance,
                    "reason": request.reason(),
                })),
            )
            .await;

        Ok(RollbackOutcome {
            transaction,
            rolled_back: original,
        })
    }

    /// Manual credit (positive) or debit (negative). Root admin only; a
    /// reason is mandatory.
    pub async fn adjust(
        &self,
        caller: &Caller,
        user_id: UserId,
        amount: Decimal,
        reason: &str,
    ) -> Result<AppliedTransaction> {
        caller.ensure_root()?;
        if reason.trim().is_empty() {
            return Err(DomainError::EmptyField { field: "reason" }.into());
        }

        let request = TxRequest::try_new(user_id, amount, TxKind::Adjustment)?
            .with_reason(reason)?
            .with_actor(caller.id().clone());
        let transaction = self.apply_tsb_transaction(&request).await?;

        self.audit
            .record(
                AuditEntry::new(caller.id().clone(), AuditAction::LedgerAdjust, "tsb_wallet")
                    .target(request.user_id().as_str())
                    .detail(json!({
                        "amount": request.amount(),
                        "tx_id": transaction.tx_id,
                        "balance": transaction.balance,
                        "reason": request.reason(),
                    })),
            )
            .await;

        Ok(transaction)
    }

    /// Transactions, newest first, optionally for one user.
    pub async fn list(&self, user: Option<&UserId>, page: Page) -> Result<Vec<LedgerEntry>> {
        self.store.list(user, page).await
    }
}
