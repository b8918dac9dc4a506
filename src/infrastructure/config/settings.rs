//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all gateway settings.
//! Configuration is loaded from a TOML file with environment variable overrides
//! for the Supabase project: `SUPABASE_URL`, `SUPABASE_SERVICE_ROLE_KEY` and
//! `SUPABASE_ANON_KEY`. Keys are never read from the file.
//!
//! # Example
//!
//! ```no_run
//! use tsbgate::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use std::net::SocketAddr;
use std::path::Path;

use serde::Deserialize;

use super::access::AccessConfig;
use super::backend::{BackendConfig, BackendKind};
use super::logging::LoggingConfig;
use super::server::ServerConfig;
use super::wallet::WalletConfig;
use crate::application::ServiceSettings;
use crate::domain::page::MAX_LIMIT;
use crate::domain::Role;
use crate::error::{ConfigError, Result};

pub const ENV_SUPABASE_URL: &str = "SUPABASE_URL";
pub const ENV_SERVICE_ROLE_KEY: &str = "SUPABASE_SERVICE_ROLE_KEY";
pub const ENV_ANON_KEY: &str = "SUPABASE_ANON_KEY";

/// Main application configuration.
///
/// Every section is optional. Load from a TOML file using [`Config::load`] or
/// parse directly with [`Config::parse_toml`].
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// HTTP listener settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Logging and tracing configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Backend selection and connection settings.
    #[serde(default)]
    pub backend: BackendConfig,

    /// Role guard settings.
    #[serde(default)]
    pub access: AccessConfig,

    /// Wallet view settings.
    #[serde(default)]
    pub wallet: WalletConfig,
}

impl Config {
    /// Parse configuration from TOML content, reading overrides from the
    /// process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML content is malformed or validation fails.
    pub fn parse_toml(content: &str) -> Result<Self> {
        Self::parse_toml_with_env(content, |key| std::env::var(key).ok())
    }

    /// Parse configuration from TOML content with an explicit environment
    /// lookup.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML content is malformed or validation fails.
    pub fn parse_toml_with_env<F>(content: &str, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.apply_env(env);
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, the TOML content is
    /// malformed, or validation fails.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    fn apply_env<F>(&mut self, env: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| env(key).filter(|v| !v.trim().is_empty());

        if let Some(url) = non_empty(ENV_SUPABASE_URL) {
            self.backend.supabase.url = url;
        }
        self.backend.supabase.service_role_key = non_empty(ENV_SERVICE_ROLE_KEY);
        self.backend.supabase.anon_key = non_empty(ENV_ANON_KEY);
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        if self.server.bind.parse::<SocketAddr>().is_err() {
            return Err(ConfigError::InvalidValue {
                field: "server.bind",
                reason: format!("'{}' is not a socket address", self.server.bind),
            }
            .into());
        }
        if self.server.request_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "server.request_timeout_secs",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }

        if !matches!(self.logging.format.as_str(), "pretty" | "json") {
            return Err(ConfigError::InvalidValue {
                field: "logging.format",
                reason: "must be 'pretty' or 'json'".to_string(),
            }
            .into());
        }

        if self.backend.kind == BackendKind::Supabase {
            let supabase = &self.backend.supabase;
            if supabase.url.trim().is_empty() {
                return Err(ConfigError::MissingField {
                    field: "backend.url",
                }
                .into());
            }
            if let Err(e) = url::Url::parse(supabase.url.trim()) {
                return Err(ConfigError::InvalidValue {
                    field: "backend.url",
                    reason: e.to_string(),
                }
                .into());
            }
            if supabase.service_role_key.is_none() {
                return Err(ConfigError::MissingField {
                    field: ENV_SERVICE_ROLE_KEY,
                }
                .into());
            }
            if supabase.http.timeout_ms == 0 {
                return Err(ConfigError::InvalidValue {
                    field: "backend.http.timeout_ms",
                    reason: "must be greater than 0".to_string(),
                }
                .into());
            }
        }

        if self.access.admin_roles.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "access.admin_roles",
                reason: "must name at least one role".to_string(),
            }
            .into());
        }
        if self.access.admin_roles.contains(&Role::Unknown) {
            return Err(ConfigError::InvalidValue {
                field: "access.admin_roles",
                reason: "contains an unknown role".to_string(),
            }
            .into());
        }

        if self.wallet.recent_transactions == 0 || self.wallet.recent_transactions > MAX_LIMIT {
            return Err(ConfigError::InvalidValue {
                field: "wallet.recent_transactions",
                reason: format!("must be between 1 and {MAX_LIMIT}"),
            }
            .into());
        }

        Ok(())
    }

    /// Initialize logging based on configuration.
    pub fn init_logging(&self) {
        self.logging.init();
    }

    /// Settings consumed by the application services.
    #[must_use]
    pub fn service_settings(&self) -> ServiceSettings {
        ServiceSettings {
            admin_roles: self.access.admin_roles.clone(),
            recent_transactions: self.wallet.recent_transactions,
        }
    }
}
