//! `/api/tsb` handlers: the caller's own wallet.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::routing::get;
use axum::{Json, Router};

use super::admin::{PageQuery, TransactionsResponse};
use super::bearer_token;
use super::error::ApiError;
use crate::application::{AppState, WalletOverview};
use crate::domain::Page;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/wallet", get(wallet))
        .route("/transactions", get(transactions))
}

async fn wallet(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<WalletOverview>, ApiError> {
    let caller = state.guard.require_user(bearer_token(&headers)).await?;
    Ok(Json(state.wallet.overview(&caller).await?))
}

async fn transactions(
    State(state): State<AppState>,
    headers: HeaderMap,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> Result<Json<TransactionsResponse>, ApiError> {
    let caller = state.guard.require_user(bearer_token(&headers)).await?;
    let Query(query) = query?;

    let page = Page::new(query.limit, query.offset);
    let transactions = state.wallet.transactions(&caller, page).await?;
    Ok(Json(TransactionsResponse {
        transactions,
        limit: page.limit,
        offset: page.offset,
    }))
}
