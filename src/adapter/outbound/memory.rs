//! In-memory backend for tests and local development.
//!
//! Implements every outbound port on one type. `apply` holds the wallet and
//! transaction locks together so a balance and its ledger row never diverge,
//! matching the atomicity of the hosted `tsb_apply_tx` procedure.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use rust_decimal::Decimal;

use crate::domain::{
    AppliedTransaction, AuditEntry, LedgerEntry, Page, Profile, Role, TxId, TxKind, TxRequest,
    UserId, Wallet,
};
use crate::error::{BackendError, LedgerError, Result};
use crate::port::{AuditSink, AuthUser, BackendProbe, LedgerStore, ProfileStore, TokenVerifier};

/// In-memory implementation of the hosted backend.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    tokens: RwLock<HashMap<String, UserId>>,
    profiles: RwLock<Vec<Profile>>,
    wallets: RwLock<HashMap<UserId, Wallet>>,
    transactions: RwLock<Vec<LedgerEntry>>,
    audit: RwLock<Vec<AuditEntry>>,
    fail_audit: AtomicBool,
}

impl MemoryBackend {
    /// Create an empty backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a bearer token for `id` and create its profile.
    pub fn add_user(&self, token: &str, id: &str, role: Role) {
        self.add_token(token, id);
        self.insert_profile(Profile {
            id: UserId::new(id),
            username: Some(id.to_string()),
            pi_uid: None,
            role,
            created_at: Some(Utc::now()),
        });
    }

    /// Register a bearer token without creating a profile.
    pub fn add_token(&self, token: &str, id: &str) {
        self.tokens
            .write()
            .insert(token.to_string(), UserId::new(id));
    }

    /// Insert or replace a profile row.
    pub fn insert_profile(&self, profile: Profile) {
        let mut profiles = self.profiles.write();
        profiles.retain(|p| p.id != profile.id);
        profiles.push(profile);
    }

    /// Profile row by id.
    #[must_use]
    pub fn profile(&self, id: &UserId) -> Option<Profile> {
        self.profiles.read().iter().find(|p| &p.id == id).cloned()
    }

    /// Overwrite a wallet balance without writing a ledger row.
    pub fn set_balance(&self, user: &UserId, balance: Decimal) {
        self.wallets.write().insert(
            user.clone(),
            Wallet {
                user_id: user.clone(),
                balance,
                updated_at: Some(Utc::now()),
            },
        );
    }

    /// Current balance, zero for users without a wallet.
    #[must_use]
    pub fn balance(&self, user: &UserId) -> Decimal {
        self.wallets
            .read()
            .get(user)
            .map_or(Decimal::ZERO, |w| w.balance)
    }

    /// Snapshot of recorded audit entries, oldest first.
    #[must_use]
    pub fn audit_entries(&self) -> Vec<AuditEntry> {
        self.audit.read().clone()
    }

    /// Make subsequent audit writes fail.
    pub fn fail_audit_writes(&self, fail: bool) {
        self.fail_audit.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl TokenVerifier for MemoryBackend {
    async fn verify(&self, token: &str) -> Result<Option<AuthUser>> {
        Ok(self.tokens.read().get(token).map(|id| AuthUser {
            id: id.clone(),
            email: None,
        }))
    }
}

#[async_trait]
impl ProfileStore for MemoryBackend {
    async fn get(&self, id: &UserId) -> Result<Option<Profile>> {
        Ok(self.profile(id))
    }

    async fn list(&self, search: Option<&str>, page: Page) -> Result<Vec<Profile>> {
        let profiles = self.profiles.read();
        let matching = profiles
            .iter()
            .rev()
            .filter(|p| search.map_or(true, |s| p.matches(s)))
            .cloned();
        Ok(page.apply(matching))
    }

    async fn set_role(&self, id: &UserId, role: Role) -> Result<Option<Profile>> {
        let mut profiles = self.profiles.write();
        Ok(profiles.iter_mut().find(|p| &p.id == id).map(|p| {
            p.role = role;
            p.clone()
        }))
    }
}

#[async_trait]
impl LedgerStore for MemoryBackend {
    async fn apply(&self, request: &TxRequest) -> Result<AppliedTransaction> {
        let mut wallets = self.wallets.write();
        let mut transactions = self.transactions.write();

        let current = wallets
            .get(request.user_id())
            .map_or(Decimal::ZERO, |w| w.balance);
        let balance = current.checked_add(request.amount()).ok_or_else(|| {
            LedgerError::ApplyFailed(format!(
                "balance {current} cannot absorb {}",
                request.amount()
            ))
        })?;
        if balance < Decimal::ZERO {
            return Err(LedgerError::InsufficientBalance(format!(
                "balance {current} cannot cover {}",
                request.amount()
            ))
            .into());
        }

        let now = Utc::now();
        let tx_id = TxId::generate();
        wallets.insert(
            request.user_id().clone(),
            Wallet {
                user_id: request.user_id().clone(),
                balance,
                updated_at: Some(now),
            },
        );
        transactions.push(LedgerEntry {
            id: tx_id.clone(),
            user_id: request.user_id().clone(),
            amount: request.amount(),
            kind: request.kind(),
            reason: request.reason().map(str::to_string),
            ref_id: request.ref_id().map(str::to_string),
            actor_id: request.actor_id().cloned(),
            balance_after: Some(balance),
            created_at: Some(now),
        });

        Ok(AppliedTransaction { tx_id, balance })
    }

    async fn get(&self, id: &TxId) -> Result<Option<LedgerEntry>> {
        Ok(self
            .transactions
            .read()
            .iter()
            .find(|tx| &tx.id == id)
            .cloned())
    }

    async fn find_reversal(&self, id: &TxId) -> Result<Option<LedgerEntry>> {
        Ok(self
            .transactions
            .read()
            .iter()
            .find(|tx| tx.kind == TxKind::Rollback && tx.ref_id.as_deref() == Some(id.as_str()))
            .cloned())
    }

    async fn list(&self, user: Option<&UserId>, page: Page) -> Result<Vec<LedgerEntry>> {
        let transactions = self.transactions.read();
        let matching = transactions
            .iter()
            .rev()
            .filter(|tx| user.map_or(true, |u| &tx.user_id == u))
            .cloned();
        Ok(page.apply(matching))
    }

    async fn wallet(&self, user: &UserId) -> Result<Option<Wallet>> {
        Ok(self.wallets.read().get(user).cloned())
    }
}

#[async_trait]
impl AuditSink for MemoryBackend {
    async fn record(&self, entry: &AuditEntry) -> Result<()> {
        if self.fail_audit.load(Ordering::SeqCst) {
            return Err(BackendError::Unavailable("audit writes disabled".into()).into());
        }
        let mut audit = self.audit.write();
        let mut entry = entry.clone();
        entry.id = Some(format!("audit-{}", audit.len() + 1));
        entry.created_at.get_or_insert_with(Utc::now);
        audit.push(entry);
        Ok(())
    }

    async fn list(&self, page: Page) -> Result<Vec<AuditEntry>> {
        let audit = self.audit.read();
        Ok(page.apply(audit.iter().rev().cloned()))
    }
}

#[async_trait]
impl BackendProbe for MemoryBackend {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}
