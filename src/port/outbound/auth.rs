//! Bearer-token verification port.

use async_trait::async_trait;

use crate::domain::UserId;
use crate::error::Result;

/// User identity resolved from a bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub id: UserId,
    pub email: Option<String>,
}

/// Resolves bearer tokens issued by the auth provider.
#[async_trait]
pub trait TokenVerifier: Send + Sync {
    /// Resolve `token` to a user.
    ///
    /// Returns `Ok(None)` when the provider rejects the token; `Err` only for
    /// transport or decoding failures.
    async fn verify(&self, token: &str) -> Result<Option<AuthUser>>;
}
