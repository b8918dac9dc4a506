//! Shared application state.

use crate::domain::Role;
use crate::port::Backend;

use super::audit::AuditTrail;
use super::guard::AccessGuard;
use super::ledger::LedgerService;
use super::users::UserAdminService;
use super::wallet::WalletService;

/// Service-level settings derived from configuration.
#[derive(Debug, Clone)]
pub struct ServiceSettings {
    /// Allowed-role list for read-only admin views.
    pub admin_roles: Vec<Role>,
    /// Number of transactions included in the wallet overview.
    pub recent_transactions: u32,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            admin_roles: vec![Role::RootAdmin, Role::Admin],
            recent_transactions: 20,
        }
    }
}

/// Everything a request handler needs. Cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub guard: AccessGuard,
    pub ledger: LedgerService,
    pub users: UserAdminService,
    pub wallet: WalletService,
    pub audit: AuditTrail,
    pub backend: Backend,
}

impl AppState {
    #[must_use]
    pub fn new(backend: Backend, settings: &ServiceSettings) -> Self {
        let audit = AuditTrail::new(backend.audit.clone());
        Self {
            guard: AccessGuard::new(
                backend.verifier.clone(),
                backend.profiles.clone(),
                settings.admin_roles.clone(),
            ),
            ledger: LedgerService::new(backend.ledger.clone(), audit.clone()),
            users: UserAdminService::new(backend.profiles.clone(), audit.clone()),
            wallet: WalletService::new(backend.ledger.clone(), settings.recent_transactions),
            audit,
            backend,
        }
    }
}
