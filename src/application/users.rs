//! User administration: listing profiles and changing roles.

use std::sync::Arc;

use serde_json::json;
use tracing::info;

use super::audit::AuditTrail;
use super::guard::Caller;
use crate::domain::{AuditAction, AuditEntry, Page, Profile, Role, UserId};
use crate::error::{AdminError, Result};
use crate::port::ProfileStore;

#[derive(Clone)]
pub struct UserAdminService {
    profiles: Arc<dyn ProfileStore>,
    audit: AuditTrail,
}

impl UserAdminService {
    #[must_use]
    pub fn new(profiles: Arc<dyn ProfileStore>, audit: AuditTrail) -> Self {
        Self { profiles, audit }
    }

    /// List profiles, optionally filtered by a search term.
    pub async fn list(&self, search: Option<&str>, page: Page) -> Result<Vec<Profile>> {
        let search = search.map(str::trim).filter(|s| !s.is_empty());
        self.profiles.list(search, page).await
    }

    /// Change `target`'s role. Root admin only.
    ///
    /// `root_admin` cannot be granted through this path, a root admin cannot
    /// change their own role, and unknown role strings are rejected.
    ///
    /// # Errors
    ///
    /// [`AdminError::RoleChangeDenied`], [`AdminError::UserNotFound`], or
    /// [`DomainError::UnknownRole`](crate::domain::DomainError::UnknownRole).
    pub async fn change_role(
        &self,
        caller: &Caller,
        target: &UserId,
        role: &str,
    ) -> Result<Profile> {
        caller.ensure_root()?;
        let role: Role = role.parse()?;

        if role.is_root() {
            return Err(AdminError::RoleChangeDenied(
                "root_admin cannot be granted through the API".into(),
            )
            .into());
        }
        if target == caller.id() {
            return Err(
                AdminError::RoleChangeDenied("cannot change your own role".into()).into(),
            );
        }

        let previous = self
            .profiles
            .get(target)
            .await?
            .ok_or_else(|| AdminError::UserNotFound(target.clone()))?;

        let updated = self
            .profiles
            .set_role(target, role)
            .await?
            .ok_or_else(|| AdminError::UserNotFound(target.clone()))?;

        info!(
            actor = %caller.id(),
            target = %target,
            from = %previous.role,
            to = %updated.role,
            "Role changed"
        );

        self.audit
            .record(
                AuditEntry::new(caller.id().clone(), AuditAction::UserRoleChange, "profile")
                    .target(target.as_str())
                    .detail(json!({
                        "from": previous.role,
                        "to": updated.role,
                    })),
            )
            .await;

        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::outbound::memory::MemoryBackend;
    use crate::domain::DomainError;
    use crate::error::{AccessError, Error};

    struct Fixture {
        backend: Arc<MemoryBackend>,
        svc: UserAdminService,
        root: Caller,
    }

    async fn fixture() -> Fixture {
        let backend = Arc::new(MemoryBackend::new());
        backend.add_user("root-token", "root-1", Role::RootAdmin);
        backend.add_user("t-1", "u-1", Role::User);
        backend.add_user("t-2", "root-2", Role::RootAdmin);
        let svc = UserAdminService::new(backend.clone(), AuditTrail::new(backend.clone()));
        let root = Caller {
            profile: ProfileStore::get(backend.as_ref(), &UserId::new("root-1"))
                .await
                .unwrap()
                .unwrap(),
        };
        Fixture { backend, svc, root }
    }

    #[tokio::test]
    async fn promotes_user_and_audits() {
        let f = fixture().await;
        let updated = f
            .svc
            .change_role(&f.root, &UserId::new("u-1"), "moderator")
            .await
            .unwrap();
        assert_eq!(updated.role, Role::Moderator);

        let audit = f.backend.audit_entries();
        assert_eq!(audit.len(), 1);
        assert_eq!(audit[0].action, AuditAction::UserRoleChange);
        assert_eq!(audit[0].detail["from"], "user");
        assert_eq!(audit[0].detail["to"], "moderator");
    }

    #[tokio::test]
    async fn granting_root_is_denied() {
        let f = fixture().await;
        let result = f
            .svc
            .change_role(&f.root, &UserId::new("u-1"), "root_admin")
            .await;
        assert!(matches!(
            result,
            Err(Error::Admin(AdminError::RoleChangeDenied(_)))
        ));
    }

    #[tokio::test]
    async fn self_change_is_denied() {
        let f = fixture().await;
        let result = f
            .svc
            .change_role(&f.root, &UserId::new("root-1"), "user")
            .await;
        assert!(matches!(
            result,
            Err(Error::Admin(AdminError::RoleChangeDenied(_)))
        ));
    }

    #[tokio::test]
    async fn unknown_role_string_is_rejected() {
        let f = fixture().await;
        let result = f
            .svc
            .change_role(&f.root, &UserId::new("u-1"), "owner")
            .await;
        assert!(matches!(
            result,
            Err(Error::Domain(DomainError::UnknownRole(_)))
        ));
    }

    #[tokio::test]
    async fn missing_target_is_not_found() {
        let f = fixture().await;
        let result = f
            .svc
            .change_role(&f.root, &UserId::new("nobody"), "admin")
            .await;
        assert!(matches!(
            result,
            Err(Error::Admin(AdminError::UserNotFound(_)))
        ));
        assert!(f.backend.audit_entries().is_empty());
    }

    #[tokio::test]
    async fn non_root_cannot_change_roles() {
        let f = fixture().await;
        let mut admin = f.root.clone();
        admin.profile.role = Role::Admin;
        let result = f
            .svc
            .change_role(&admin, &UserId::new("u-1"), "admin")
            .await;
        assert!(matches!(
            result,
            Err(Error::Access(AccessError::Forbidden { .. }))
        ));
    }

    #[tokio::test]
    async fn root_may_demote_another_root() {
        let f = fixture().await;
        let updated = f
            .svc
            .change_role(&f.root, &UserId::new("root-2"), "admin")
            .await
            .unwrap();
        assert_eq!(updated.role, Role::Admin);
    }

    #[tokio::test]
    async fn blank_search_lists_everyone() {
        let f = fixture().await;
        let all = f.svc.list(Some("  "), Page::default()).await.unwrap();
        assert_eq!(all.len(), 3);
    }
}
