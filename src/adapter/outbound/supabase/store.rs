//! PostgREST-backed profile, ledger and audit stores.

use async_trait::async_trait;
use uuid::Uuid;

use super::client::{eq, newest_first, profile_search, SupabaseClient};
use super::dto::{ApplyTxParams, ApplyTxResponse, RoleUpdate};
use crate::domain::{
    AppliedTransaction, AuditEntry, LedgerEntry, Page, Profile, Role, TxId, TxKind, TxRequest,
    UserId, Wallet,
};
use crate::error::{BackendError, Error, LedgerError, Result};
use crate::port::{AuditSink, LedgerStore, ProfileStore};

const PROFILE_COLUMNS: &str = "id,username,pi_uid,role,created_at";

/// Ids are `uuid` columns; PostgREST rejects anything else with `22P02`
/// instead of returning no rows.
fn is_uuid(value: &str) -> bool {
    Uuid::parse_str(value).is_ok()
}

#[async_trait]
impl ProfileStore for SupabaseClient {
    async fn get(&self, id: &UserId) -> Result<Option<Profile>> {
        if !is_uuid(id.as_str()) {
            return Ok(None);
        }
        let mut url = self.rest_url("profiles")?;
        url.query_pairs_mut().append_pair("select", PROFILE_COLUMNS);
        eq(&mut url, "id", id.as_str());
        url.query_pairs_mut().append_pair("limit", "1");
        let rows: Vec<Profile> = self.select(url).await?;
        Ok(rows.into_iter().next())
    }

    async fn list(&self, search: Option<&str>, page: Page) -> Result<Vec<Profile>> {
        let mut url = self.rest_url("profiles")?;
        url.query_pairs_mut().append_pair("select", PROFILE_COLUMNS);
        if let Some(filter) = search.and_then(profile_search) {
            url.query_pairs_mut().append_pair("or", &filter);
        }
        newest_first(&mut url, page);
        self.select(url).await
    }

    async fn set_role(&self, id: &UserId, role: Role) -> Result<Option<Profile>> {
        if !is_uuid(id.as_str()) {
            return Ok(None);
        }
        let mut url = self.rest_url("profiles")?;
        eq(&mut url, "id", id.as_str());
        url.query_pairs_mut().append_pair("select", PROFILE_COLUMNS);
        let rows: Vec<Profile> = self.patch(url, &RoleUpdate { role }).await?;
        Ok(rows.into_iter().next())
    }
}

#[async_trait]
impl LedgerStore for SupabaseClient {
    async fn apply(&self, request: &TxRequest) -> Result<AppliedTransaction> {
        let url = self.rest_url("rpc/tsb_apply_tx")?;
        let response: ApplyTxResponse = self
            .post(url, &ApplyTxParams::from(request))
            .await
            .map_err(procedure_error)?;
        response
            .into_applied()
            .ok_or_else(|| BackendError::Decode("tsb_apply_tx returned no rows".into()).into())
    }

    async fn get(&self, id: &TxId) -> Result<Option<LedgerEntry>> {
        if !is_uuid(id.as_str()) {
            return Ok(None);
        }
        let mut url = self.rest_url("tsb_transactions")?;
        eq(&mut url, "id", id.as_str());
        url.query_pairs_mut().append_pair("limit", "1");
        let rows: Vec<LedgerEntry> = self.select(url).await?;
        Ok(rows.into_iter().next())
    }

    async fn find_reversal(&self, id: &TxId) -> Result<Option<LedgerEntry>> {
        if !is_uuid(id.as_str()) {
            return Ok(None);
        }
        let mut url = self.rest_url("tsb_transactions")?;
        eq(&mut url, "kind", TxKind::Rollback.as_str());
        eq(&mut url, "ref_id", id.as_str());
        url.query_pairs_mut().append_pair("limit", "1");
        let rows: Vec<LedgerEntry> = self.select(url).await?;
        Ok(rows.into_iter().next())
    }

    async fn list(&self, user: Option<&UserId>, page: Page) -> Result<Vec<LedgerEntry>> {
        let mut url = self.rest_url("tsb_transactions")?;
        if let Some(user) = user {
            if !is_uuid(user.as_str()) {
                return Ok(Vec::new());
            }
            eq(&mut url, "user_id", user.as_str());
        }
        newest_first(&mut url, page);
        self.select(url).await
    }

    async fn wallet(&self, user: &UserId) -> Result<Option<Wallet>> {
        if !is_uuid(user.as_str()) {
            return Ok(None);
        }
        let mut url = self.rest_url("tsb_wallets")?;
        eq(&mut url, "user_id", user.as_str());
        url.query_pairs_mut().append_pair("limit", "1");
        let rows: Vec<Wallet> = self.select(url).await?;
        Ok(rows.into_iter().next())
    }
}

#[async_trait]
impl AuditSink for SupabaseClient {
    async fn record(&self, entry: &AuditEntry) -> Result<()> {
        let url = self.rest_url("audit_logs")?;
        self.insert(url, entry).await
    }

    async fn list(&self, page: Page) -> Result<Vec<AuditEntry>> {
        let mut url = self.rest_url("audit_logs")?;
        newest_first(&mut url, page);
        self.select(url).await
    }
}

/// Map a rejection raised inside `tsb_apply_tx` to a ledger error.
///
/// Server errors, transport failures and PostgREST's own `PGRST*` errors
/// (missing function, bad schema cache) pass through unchanged.
fn procedure_error(err: Error) -> Error {
    match err {
        Error::Backend(BackendError::Status {
            status,
            code,
            message,
        }) if status < 500 && !code.as_deref().is_some_and(|c| c.starts_with("PGRST")) => {
            if message.to_lowercase().contains("insufficient") {
                LedgerError::InsufficientBalance(message).into()
            } else {
                LedgerError::ApplyFailed(message).into()
            }
        }
        other => other,
    }
}
