//! Domain validation errors.
//!
//! Returned by `try_new` constructors and parsers when an input violates a
//! rule the database would otherwise enforce (or silently accept).
//!
//! # Examples
//!
//! ```
//! use rust_decimal::Decimal;
//! use tsbgate::domain::error::DomainError;
//! use tsbgate::domain::id::UserId;
//! use tsbgate::domain::ledger::{TxKind, TxRequest};
//!
//! let result = TxRequest::try_new(UserId::new("u-1"), Decimal::ZERO, TxKind::Credit);
//! assert!(matches!(result, Err(DomainError::ZeroAmount)));
//! ```

use thiserror::Error;

/// Errors that occur when domain invariants are violated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Ledger transactions must move a non-zero amount.
    #[error("amount must be non-zero")]
    ZeroAmount,

    /// Identifiers must not be blank.
    #[error("{field} cannot be empty")]
    EmptyField {
        /// Name of the offending field.
        field: &'static str,
    },

    /// Free-text fields are bounded.
    #[error("{field} exceeds {max} characters")]
    TooLong {
        /// Name of the offending field.
        field: &'static str,
        /// Maximum accepted length in characters.
        max: usize,
    },

    /// Role strings must name a known role.
    #[error("unknown role '{0}'")]
    UnknownRole(String),
}
