//! Role-guard configuration.

use serde::Deserialize;

use crate::domain::Role;

/// Access-control settings.
#[derive(Debug, Clone, Deserialize)]
pub struct AccessConfig {
    /// Roles allowed on read-only admin endpoints.
    #[serde(default = "default_admin_roles")]
    pub admin_roles: Vec<Role>,
}

fn default_admin_roles() -> Vec<Role> {
    vec![Role::RootAdmin, Role::Admin]
}

impl Default for AccessConfig {
    fn default() -> Self {
        Self {
            admin_roles: default_admin_roles(),
        }
    }
}
