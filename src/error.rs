use thiserror::Error;

use crate::domain::error::DomainError;
use crate::domain::{Role, TxId, UserId};

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Authentication and role-guard failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AccessError {
    #[error("missing bearer token")]
    MissingToken,

    #[error("invalid or expired token")]
    InvalidToken,

    #[error("no profile for user {user_id}")]
    ProfileNotFound { user_id: UserId },

    #[error("role '{role}' is not allowed; requires {required}")]
    Forbidden { role: Role, required: String },
}

/// Ledger operation failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("transaction {0} not found")]
    TxNotFound(TxId),

    #[error("transaction {0} is a rollback and cannot be reversed")]
    NotReversible(TxId),

    #[error("transaction {tx_id} was already rolled back by {rollback_id}")]
    AlreadyRolledBack { tx_id: TxId, rollback_id: TxId },

    #[error("insufficient balance: {0}")]
    InsufficientBalance(String),

    #[error("ledger apply failed: {0}")]
    ApplyFailed(String),
}

/// User administration failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AdminError {
    #[error("user {0} not found")]
    UserNotFound(UserId),

    #[error("role change denied: {0}")]
    RoleChangeDenied(String),
}

/// Failures talking to the hosted backend.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    /// The backend answered with a non-success status.
    #[error("backend returned {status}: {message}")]
    Status {
        status: u16,
        code: Option<String>,
        message: String,
    },

    #[error("backend unavailable: {0}")]
    Unavailable(String),

    #[error("unexpected backend response: {0}")]
    Decode(String),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Access(#[from] AccessError),

    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error(transparent)]
    Admin(#[from] AdminError),

    #[error(transparent)]
    Backend(#[from] BackendError),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),
}

pub type Result<T> = std::result::Result<T, Error>;
