//! Composition root: turns a [`Config`] into a running [`AppState`].

use std::sync::Arc;

use tracing::{info, warn};

use crate::adapter::outbound::memory::MemoryBackend;
use crate::adapter::outbound::supabase::SupabaseClient;
use crate::application::AppState;
use crate::domain::UserId;
use crate::error::Result;
use crate::infrastructure::config::backend::{BackendConfig, BackendKind, MemoryConfig};
use crate::infrastructure::config::settings::Config;
use crate::port::Backend;

/// Build the outbound backend selected by `[backend] kind`.
///
/// # Errors
///
/// Returns an error when the Supabase client cannot be configured.
pub fn build_backend(config: &BackendConfig) -> Result<Backend> {
    match config.kind {
        BackendKind::Supabase => {
            let client = SupabaseClient::from_config(&config.supabase)?;
            info!(url = %config.supabase.url, "Using Supabase backend");
            Ok(Backend::from_shared(Arc::new(client)))
        }
        BackendKind::Memory => {
            warn!("Using in-memory backend; data is lost on shutdown");
            Ok(Backend::from_shared(Arc::new(seeded_memory(&config.memory))))
        }
    }
}

/// Memory backend populated from `[[backend.memory.users]]`.
#[must_use]
pub fn seeded_memory(config: &MemoryConfig) -> MemoryBackend {
    let backend = MemoryBackend::new();
    for user in &config.users {
        backend.add_user(&user.token, &user.id, user.role);
        if let Some(username) = &user.username {
            if let Some(mut profile) = backend.profile(&UserId::new(&user.id)) {
                profile.username = Some(username.clone());
                backend.insert_profile(profile);
            }
        }
        if let Some(balance) = user.balance {
            backend.set_balance(&UserId::new(&user.id), balance);
        }
    }
    info!(users = config.users.len(), "Seeded memory backend");
    backend
}

/// Build the full application state from configuration.
///
/// # Errors
///
/// Returns an error when the backend cannot be built.
pub fn build_state(config: &Config) -> Result<AppState> {
    let backend = build_backend(&config.backend)?;
    Ok(AppState::new(backend, &config.service_settings()))
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;
    use crate::domain::Role;
    use crate::infrastructure::config::backend::SeedUser;

    #[test]
    fn seeded_memory_applies_users_and_balances() {
        let config = MemoryConfig {
            users: vec![SeedUser {
                token: "dev".into(),
                id: "root-1".into(),
                role: Role::RootAdmin,
                username: Some("ops".into()),
                balance: Some(dec!(50)),
            }],
        };
        let backend = seeded_memory(&config);
        let id = UserId::new("root-1");
        assert_eq!(backend.balance(&id), dec!(50));
        let profile = backend.profile(&id).unwrap();
        assert_eq!(profile.username.as_deref(), Some("ops"));
        assert_eq!(profile.role, Role::RootAdmin);
    }

    #[tokio::test]
    async fn memory_state_reports_backend_name() {
        let config = BackendConfig {
            kind: BackendKind::Memory,
            ..Default::default()
        };
        let backend = build_backend(&config).unwrap();
        assert_eq!(backend.probe.backend_name(), "memory");
        assert!(backend.probe.ping().await.is_ok());
    }

    #[test]
    fn supabase_without_key_fails_to_build() {
        let mut config = BackendConfig::default();
        config.supabase.url = "https://demo.supabase.co".into();
        assert!(build_backend(&config).is_err());
    }
}
