//! Role-based access guard.
//!
//! Every `/api` handler resolves its caller here before touching the backend:
//! bearer token → auth user → profile row → role check.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::{Profile, Role, UserId};
use crate::error::{AccessError, Result};
use crate::port::{ProfileStore, TokenVerifier};

/// An authenticated caller with a loaded profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller {
    pub profile: Profile,
}

impl Caller {
    #[must_use]
    pub fn id(&self) -> &UserId {
        &self.profile.id
    }

    #[must_use]
    pub fn role(&self) -> Role {
        self.profile.role
    }

    /// Re-check root privileges inside a service, independent of the route
    /// guard that produced this caller.
    ///
    /// # Errors
    ///
    /// [`AccessError::Forbidden`] for any non-root caller.
    pub fn ensure_root(&self) -> std::result::Result<(), AccessError> {
        if self.role().is_root() {
            Ok(())
        } else {
            Err(AccessError::Forbidden {
                role: self.role(),
                required: Role::RootAdmin.as_str().to_string(),
            })
        }
    }
}

/// Resolves callers and enforces role requirements.
#[derive(Clone)]
pub struct AccessGuard {
    verifier: Arc<dyn TokenVerifier>,
    profiles: Arc<dyn ProfileStore>,
    admin_roles: Vec<Role>,
}

impl AccessGuard {
    /// Create a guard. `admin_roles` is the allowed-role list used by
    /// [`AccessGuard::require_admin`].
    #[must_use]
    pub fn new(
        verifier: Arc<dyn TokenVerifier>,
        profiles: Arc<dyn ProfileStore>,
        admin_roles: Vec<Role>,
    ) -> Self {
        Self {
            verifier,
            profiles,
            admin_roles,
        }
    }

    #[must_use]
    pub fn admin_roles(&self) -> &[Role] {
        &self.admin_roles
    }

    /// Resolve a bearer token to a caller with a profile.
    ///
    /// # Errors
    ///
    /// [`AccessError::MissingToken`] for an absent or blank token,
    /// [`AccessError::InvalidToken`] when the auth provider rejects it, and
    /// [`AccessError::ProfileNotFound`] when the user has no profile row.
    pub async fn authenticate(&self, token: Option<&str>) -> Result<Caller> {
        let token = token
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(AccessError::MissingToken)?;

        let user = self
            .verifier
            .verify(token)
            .await?
            .ok_or(AccessError::InvalidToken)?;

        let profile = self
            .profiles
            .get(&user.id)
            .await?
            .ok_or_else(|| AccessError::ProfileNotFound {
                user_id: user.id.clone(),
            })?;

        debug!(user = %profile.id, role = %profile.role, "Caller authenticated");
        Ok(Caller { profile })
    }

    /// Any authenticated caller with a profile.
    pub async fn require_user(&self, token: Option<&str>) -> Result<Caller> {
        self.authenticate(token).await
    }

    /// Deny unless the caller's role is exactly `root_admin`.
    pub async fn require_root_admin(&self, token: Option<&str>) -> Result<Caller> {
        let caller = self.authenticate(token).await?;
        if caller.role().is_root() {
            return Ok(caller);
        }
        Err(deny(&caller, Role::RootAdmin.as_str().to_string()).into())
    }

    /// Deny unless the caller's role is in `allowed`.
    pub async fn require_admin_role(
        &self,
        token: Option<&str>,
        allowed: &[Role],
    ) -> Result<Caller> {
        let caller = self.authenticate(token).await?;
        if caller.role().is_in(allowed) {
            return Ok(caller);
        }
        let required = allowed
            .iter()
            .map(|r| r.as_str())
            .collect::<Vec<_>>()
            .join("|");
        Err(deny(&caller, required).into())
    }

    /// [`AccessGuard::require_admin_role`] with the configured admin roles.
    pub async fn require_admin(&self, token: Option<&str>) -> Result<Caller> {
        self.require_admin_role(token, &self.admin_roles).await
    }
}

fn deny(caller: &Caller, required: String) -> AccessError {
    warn!(
        user = %caller.id(),
        role = %caller.role(),
        required = %required,
        "Access denied"
    );
    AccessError::Forbidden {
        role: caller.role(),
        required,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::outbound::memory::MemoryBackend;
    use crate::error::Error;

    fn guard(backend: Arc<MemoryBackend>) -> AccessGuard {
        AccessGuard::new(
            backend.clone(),
            backend,
            vec![Role::RootAdmin, Role::Admin],
        )
    }

    fn seeded() -> Arc<MemoryBackend> {
        let backend = MemoryBackend::new();
        backend.add_user("root-token", "root-1", Role::RootAdmin);
        backend.add_user("admin-token", "admin-1", Role::Admin);
        backend.add_user("user-token", "user-1", Role::User);
        backend.add_user("odd-token", "odd-1", Role::Unknown);
        backend.add_token("orphan-token", "ghost");
        Arc::new(backend)
    }

    fn access_err(result: Result<Caller>) -> AccessError {
        match result {
            Err(Error::Access(e)) => e,
            other => panic!("expected access error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn missing_or_blank_token_is_unauthorized() {
        let guard = guard(seeded());
        assert_eq!(
            access_err(guard.require_user(None).await),
            AccessError::MissingToken
        );
        assert_eq!(
            access_err(guard.require_user(Some("   ")).await),
            AccessError::MissingToken
        );
    }

    #[tokio::test]
    async fn rejected_token_is_invalid() {
        let guard = guard(seeded());
        assert_eq!(
            access_err(guard.require_user(Some("nope")).await),
            AccessError::InvalidToken
        );
    }

    #[tokio::test]
    async fn user_without_profile_is_rejected() {
        let guard = guard(seeded());
        assert_eq!(
            access_err(guard.require_user(Some("orphan-token")).await),
            AccessError::ProfileNotFound {
                user_id: UserId::new("ghost")
            }
        );
    }

    #[tokio::test]
    async fn root_admin_only_accepts_root() {
        let guard = guard(seeded());
        let caller = guard.require_root_admin(Some("root-token")).await.unwrap();
        assert_eq!(caller.id().as_str(), "root-1");

        let err = access_err(guard.require_root_admin(Some("admin-token")).await);
        assert_eq!(
            err,
            AccessError::Forbidden {
                role: Role::Admin,
                required: "root_admin".into()
            }
        );
    }

    #[tokio::test]
    async fn admin_role_list_is_honoured() {
        let guard = guard(seeded());
        assert!(guard.require_admin(Some("admin-token")).await.is_ok());
        assert!(guard.require_admin(Some("root-token")).await.is_ok());
        assert!(matches!(
            access_err(guard.require_admin(Some("user-token")).await),
            AccessError::Forbidden { role: Role::User, .. }
        ));
    }

    #[tokio::test]
    async fn unknown_role_never_passes() {
        let guard = guard(seeded());
        let result = guard
            .require_admin_role(Some("odd-token"), &[Role::Unknown, Role::User])
            .await;
        assert!(matches!(
            access_err(result),
            AccessError::Forbidden { role: Role::Unknown, .. }
        ));
    }

    #[tokio::test]
    async fn empty_allow_list_denies_everyone() {
        let guard = guard(seeded());
        let result = guard.require_admin_role(Some("root-token"), &[]).await;
        assert!(matches!(access_err(result), AccessError::Forbidden { .. }));
    }
}
