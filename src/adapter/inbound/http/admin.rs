//! `/api/admin` handlers.
//!
//! Read-only views accept any configured admin role; every mutation is
//! root-admin only.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, patch, post};
use axum::{Json, Router};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::bearer_token;
use super::error::ApiError;
use crate::application::AppState;
use crate::domain::{AppliedTransaction, AuditEntry, LedgerEntry, Page, Profile, TxId, UserId};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users))
        .route("/users/:id/role", patch(change_role))
        .route("/ledger", get(list_ledger))
        .route("/ledger/adjust", post(adjust))
        .route("/ledger/rollback", post(rollback))
        .route("/audit-logs", get(audit_logs))
}

#[derive(Debug, Deserialize)]
pub struct UsersQuery {
    #[serde(default)]
    pub q: Option<String>,
    #[serde(default)]
    pub limit: Option<u32>,
    #[serde(default)]
    pub offset: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct UsersResponse {
    pub users: Vec<Profile>,
    pub limit: u32,
    pub offset: u32,
}

async fn list_users(
    State(state): State<AppState>,
    headers: HeaderMap,
    query: Result<Query<UsersQuery>, QueryRejection>,
) -> Result<Json<UsersResponse>, ApiError> {
    state.guard.require_admin(bearer_token(&headers)).await?;
    let Query(query) = query?;

    let page = Page::new(query.limit, query.offset);
    let users = state.users.list(query.q.as_deref(), page).await?;
    Ok(Json(UsersResponse {
        users,
        limit: page.limit,
        offset: page.offset,
    }))
}

#[derive(Debug, Deserialize)]
pub struct RoleChangeRequest {
    pub role: String,
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub user: Profile,
}

async fn change_role(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    body: Result<Json<RoleChangeRequest>, JsonRejection>,
) -> Result<Json<UserResponse>, ApiError> {
    let caller = state.guard.require_root_admin(bearer_token(&headers)).await?;
    let Json(body) = body?;

    let user = state
        .users
        .change_role(&caller, &UserId::new(id), &body.role)
        .await?;
    Ok(Json(UserResponse { user }))
}

#[derive(Debug, Deserialize)]
pub struct LedgerQuery {
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub limit: Option<u32>,
    #[serde(default)]
    pub offset: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct TransactionsResponse {
    pub transactions: Vec<LedgerEntry>,
    pub limit: u32,
    pub offset: u32,
}

async fn list_ledger(
    State(state): State<AppState>,
    headers: HeaderMap,
    query: Result<Query<LedgerQuery>, QueryRejection>,
) -> Result<Json<TransactionsResponse>, ApiError> {
    state.guard.require_admin(bearer_token(&headers)).await?;
    let Query(query) = query?;

    let page = Page::new(query.limit, query.offset);
    let user = query
        .user_id
        .filter(|u| !u.trim().is_empty())
        .map(UserId::new);
    let transactions = state.ledger.list(user.as_ref(), page).await?;
    Ok(Json(TransactionsResponse {
        transactions,
        limit: page.limit,
        offset: page.offset,
    }))
}

#[derive(Debug, Deserialize)]
pub struct AdjustRequest {
    pub user_id: String,
    pub amount: Decimal,
    #[serde(default)]
    pub reason: String,
}

#[derive(Debug, Serialize)]
pub struct AdjustResponse {
    pub transaction: AppliedTransaction,
}

async fn adjust(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Json<AdjustRequest>, JsonRejection>,
) -> Result<Json<AdjustResponse>, ApiError> {
    let caller = state.guard.require_root_admin(bearer_token(&headers)).await?;
    let Json(body) = body?;

    let transaction = state
        .ledger
        .adjust(&caller, UserId::new(body.user_id), body.amount, &body.reason)
        .await?;
    Ok(Json(AdjustResponse { transaction }))
}

#[derive(Debug, Deserialize)]
pub struct RollbackRequest {
    pub tx_id: String,
    #[serde(default)]
    pub reason: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RollbackResponse {
    /// The new reversing transaction.
    pub transaction: AppliedTransaction,
    /// The transaction that was reversed.
    pub rolled_back: LedgerEntry,
}

async fn rollback(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Json<RollbackRequest>, JsonRejection>,
) -> Result<Json<RollbackResponse>, ApiError> {
    let caller = state.guard.require_root_admin(bearer_token(&headers)).await?;
    let Json(body) = body?;
    if body.tx_id.trim().is_empty() {
        return Err(ApiError::new(
            StatusCode::BAD_REQUEST,
            "INVALID_TX_ID",
            "tx_id is required",
        ));
    }

    let outcome = state
        .ledger
        .rollback(&caller, &TxId::new(body.tx_id.trim()), body.reason)
        .await?;
    Ok(Json(RollbackResponse {
        transaction: outcome.transaction,
        rolled_back: outcome.rolled_back,
    }))
}

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    #[serde(default)]
    pub limit: Option<u32>,
    #[serde(default)]
    pub offset: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct AuditResponse {
    pub entries: Vec<AuditEntry>,
    pub limit: u32,
    pub offset: u32,
}

async fn audit_logs(
    State(state): State<AppState>,
    headers: HeaderMap,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> Result<Json<AuditResponse>, ApiError> {
    state.guard.require_root_admin(bearer_token(&headers)).await?;
    let Query(query) = query?;

    let page = Page::new(query.limit, query.offset);
    let entries = state.audit.list(page).await?;
    Ok(Json(AuditResponse {
        entries,
        limit: page.limit,
        offset: page.offset,
    }))
}
