//! JSON error responses.
//!
//! Every failure leaves the gateway as `{"error": CODE, "detail": "..."}`.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::error;

use crate::domain::DomainError;
use crate::error::{AccessError, AdminError, Error, LedgerError};

/// An error ready to be rendered as an HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: StatusCode,
    pub code: String,
    pub detail: String,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    detail: &'a str,
}

impl ApiError {
    pub fn new(status: StatusCode, code: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            status,
            code: code.into(),
            detail: detail.into(),
        }
    }

    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "BAD_REQUEST", detail)
    }

    pub fn not_found(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, "NOT_FOUND", detail)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: &self.code,
            detail: &self.detail,
        };
        (self.status, Json(body)).into_response()
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        match err {
            Error::Access(e) => access(e),
            Error::Domain(e) => domain(e),
            Error::Ledger(e) => ledger(e),
            Error::Admin(e) => admin(e),
            Error::Backend(_) | Error::Http(_) => {
                error!(error = %err, "Backend request failed");
                Self::new(
                    StatusCode::BAD_GATEWAY,
                    "BACKEND_UNAVAILABLE",
                    "backend request failed",
                )
            }
            Error::Config(_) | Error::Json(_) | Error::Io(_) | Error::Url(_) => {
                error!(error = %err, "Internal error");
                Self::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL",
                    "internal error",
                )
            }
        }
    }
}

fn access(err: AccessError) -> ApiError {
    let detail = err.to_string();
    match err {
        AccessError::MissingToken | AccessError::InvalidToken => {
            ApiError::new(StatusCode::UNAUTHORIZED, "UNAUTHORIZED", detail)
        }
        AccessError::ProfileNotFound { .. } => {
            ApiError::new(StatusCode::FORBIDDEN, "PROFILE_NOT_FOUND", detail)
        }
        AccessError::Forbidden { .. } => ApiError::new(StatusCode::FORBIDDEN, "FORBIDDEN", detail),
    }
}

fn domain(err: DomainError) -> ApiError {
    let detail = err.to_string();
    let code = match &err {
        DomainError::ZeroAmount => "INVALID_AMOUNT".to_string(),
        DomainError::EmptyField { field } | DomainError::TooLong { field, .. } => {
            format!("INVALID_{}", field.to_ascii_uppercase())
        }
        DomainError::UnknownRole(_) => "INVALID_ROLE".to_string(),
    };
    ApiError::new(StatusCode::BAD_REQUEST, code, detail)
}

fn ledger(err: LedgerError) -> ApiError {
    let detail = err.to_string();
    match err {
        LedgerError::TxNotFound(_) => ApiError::new(StatusCode::NOT_FOUND, "TX_NOT_FOUND", detail),
        LedgerError::NotReversible(_) => {
            ApiError::new(StatusCode::CONFLICT, "TX_NOT_REVERSIBLE", detail)
        }
        LedgerError::AlreadyRolledBack { .. } => {
            ApiError::new(StatusCode::CONFLICT, "ALREADY_ROLLED_BACK", detail)
        }
        LedgerError::InsufficientBalance(_) => ApiError::new(
            StatusCode::UNPROCESSABLE_ENTITY,
            "INSUFFICIENT_BALANCE",
            detail,
        ),
        LedgerError::ApplyFailed(_) => {
            error!(error = %detail, "tsb_apply_tx rejected the transaction");
            ApiError::new(
                StatusCode::BAD_GATEWAY,
                "LEDGER_APPLY_FAILED",
                "ledger procedure rejected the transaction",
            )
        }
    }
}

fn admin(err: AdminError) -> ApiError {
    let detail = err.to_string();
    match err {
        AdminError::UserNotFound(_) => {
            ApiError::new(StatusCode::NOT_FOUND, "USER_NOT_FOUND", detail)
        }
        AdminError::RoleChangeDenied(_) => {
            ApiError::new(StatusCode::CONFLICT, "ROLE_CHANGE_DENIED", detail)
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}
