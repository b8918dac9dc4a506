//! HTTP inbound adapter (axum).
//!
//! Each handler resolves the caller through the
//! [`AccessGuard`](crate::application::AccessGuard) before it touches the
//! backend, then maps the result to JSON. Failures render through
//! [`ApiError`].

mod admin;
mod error;
mod health;
pub mod server;
mod tsb;

use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use axum::routing::get;
use axum::Router;

pub use error::ApiError;
pub use server::serve;

use crate::application::AppState;

/// Build the gateway router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(health::healthz))
        .nest("/api/admin", admin::routes())
        .nest("/api/tsb", tsb::routes())
        .fallback(not_found)
        .with_state(state)
}

async fn not_found() -> ApiError {
    ApiError::not_found("no such route")
}

/// Token from an `Authorization: Bearer <token>` header.
pub(crate) fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.trim().split_once(' ')?;
    scheme
        .eq_ignore_ascii_case("bearer")
        .then_some(token.trim())
}
