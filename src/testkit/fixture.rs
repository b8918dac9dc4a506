//! Seeded in-memory world used across tests.

use std::sync::Arc;

use axum::Router;
use rust_decimal::Decimal;

use crate::adapter::inbound::http::router;
use crate::adapter::outbound::memory::MemoryBackend;
use crate::application::{AppState, ServiceSettings};
use crate::domain::{Role, UserId};
use crate::port::Backend;

pub const ROOT_TOKEN: &str = "root-token";
pub const ROOT_ID: &str = "root-1";
pub const ADMIN_TOKEN: &str = "admin-token";
pub const ADMIN_ID: &str = "admin-1";
pub const MODERATOR_TOKEN: &str = "moderator-token";
pub const MODERATOR_ID: &str = "moderator-1";
pub const USER_TOKEN: &str = "user-token";
pub const USER_ID: &str = "user-1";
/// Valid session whose profile row does not exist.
pub const ORPHAN_TOKEN: &str = "orphan-token";
pub const ORPHAN_ID: &str = "orphan-1";

/// Memory backend with one user per role and an orphan session.
#[must_use]
pub fn seeded_backend() -> MemoryBackend {
    let backend = MemoryBackend::new();
    backend.add_user(ROOT_TOKEN, ROOT_ID, Role::RootAdmin);
    backend.add_user(ADMIN_TOKEN, ADMIN_ID, Role::Admin);
    backend.add_user(MODERATOR_TOKEN, MODERATOR_ID, Role::Moderator);
    backend.add_user(USER_TOKEN, USER_ID, Role::User);
    backend.add_token(ORPHAN_TOKEN, ORPHAN_ID);
    backend
}

/// Seeded backend together with the state built on top of it.
pub struct Fixture {
    pub backend: Arc<MemoryBackend>,
    pub state: AppState,
}

impl Fixture {
    #[must_use]
    pub fn new() -> Self {
        Self::with_settings(&ServiceSettings::default())
    }

    #[must_use]
    pub fn with_settings(settings: &ServiceSettings) -> Self {
        let backend = Arc::new(seeded_backend());
        let state = AppState::new(Backend::from_shared(backend.clone()), settings);
        Self { backend, state }
    }

    /// Give `user` a starting balance without a ledger row.
    #[must_use]
    pub fn with_balance(self, user: &str, balance: Decimal) -> Self {
        self.backend.set_balance(&UserId::new(user), balance);
        self
    }

    /// HTTP router over this fixture's state.
    #[must_use]
    pub fn router(&self) -> Router {
        router(self.state.clone())
    }

    #[must_use]
    pub fn balance(&self, user: &str) -> Decimal {
        self.backend.balance(&UserId::new(user))
    }
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}
