//! Backend selection.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::adapter::outbound::supabase::SupabaseConfig;
use crate::domain::Role;

/// Which backend implementation serves the outbound ports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Hosted Supabase project.
    #[default]
    Supabase,
    /// In-process tables. Not persistent.
    Memory,
}

impl std::fmt::Display for BackendKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Supabase => write!(f, "supabase"),
            Self::Memory => write!(f, "memory"),
        }
    }
}

/// `[backend]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BackendConfig {
    #[serde(default)]
    pub kind: BackendKind,
    /// Supabase connection settings (`url`, `[backend.http]`).
    #[serde(flatten)]
    pub supabase: SupabaseConfig,
    /// Seed data for the memory backend.
    #[serde(default)]
    pub memory: MemoryConfig,
}

/// `[backend.memory]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MemoryConfig {
    #[serde(default)]
    pub users: Vec<SeedUser>,
}

/// A user created at startup by the memory backend.
#[derive(Debug, Clone, Deserialize)]
pub struct SeedUser {
    /// Bearer token that resolves to this user.
    pub token: String,
    pub id: String,
    #[serde(default)]
    pub role: Role,
    #[serde(default)]
    pub username: Option<String>,
    /// Opening balance, written without a ledger row.
    #[serde(default)]
    pub balance: Option<Decimal>,
}
