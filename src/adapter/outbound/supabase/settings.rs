//! Supabase backend configuration.

use serde::Deserialize;

/// Connection settings for the hosted Supabase project.
///
/// Keys are never read from the config file; they are filled from the
/// environment during config loading.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SupabaseConfig {
    /// Project URL, e.g. `https://abcd.supabase.co`.
    #[serde(default)]
    pub url: String,
    /// HTTP client settings.
    #[serde(default)]
    pub http: SupabaseHttpConfig,
    /// Service-role key (from `SUPABASE_SERVICE_ROLE_KEY`).
    #[serde(skip)]
    pub service_role_key: Option<String>,
    /// Public anon key used for token verification (from `SUPABASE_ANON_KEY`).
    #[serde(skip)]
    pub anon_key: Option<String>,
}

impl SupabaseConfig {
    /// Key sent as `apikey` when verifying user tokens. Falls back to the
    /// service-role key when no anon key is configured.
    #[must_use]
    pub fn auth_api_key(&self) -> Option<&str> {
        self.anon_key
            .as_deref()
            .or(self.service_role_key.as_deref())
    }
}

/// Supabase HTTP client configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SupabaseHttpConfig {
    /// Request timeout in milliseconds.
    #[serde(default = "default_http_timeout_ms")]
    pub timeout_ms: u64,
    /// Connect timeout in milliseconds.
    #[serde(default = "default_http_connect_timeout_ms")]
    pub connect_timeout_ms: u64,
    /// Maximum attempts for idempotent reads on transient failures.
    #[serde(default = "default_http_retry_max_attempts")]
    pub retry_max_attempts: u32,
    /// Backoff between retries in milliseconds.
    #[serde(default = "default_http_retry_backoff_ms")]
    pub retry_backoff_ms: u64,
}

const fn default_http_timeout_ms() -> u64 {
    8000
}

const fn default_http_connect_timeout_ms() -> u64 {
    2000
}

const fn default_http_retry_max_attempts() -> u32 {
    3
}

const fn default_http_retry_backoff_ms() -> u64 {
    250
}

impl Default for SupabaseHttpConfig {
    fn default() -> Self {
        Self {
            timeout_ms: default_http_timeout_ms(),
            connect_timeout_ms: default_http_connect_timeout_ms(),
            retry_max_attempts: default_http_retry_max_attempts(),
            retry_backoff_ms: default_http_retry_backoff_ms(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_defaults_apply_when_section_missing() {
        let config: SupabaseConfig = toml::from_str(r#"url = "https://x.supabase.co""#).unwrap();
        assert_eq!(config.http.timeout_ms, 8000);
        assert_eq!(config.http.retry_max_attempts, 3);
        assert!(config.service_role_key.is_none());
    }

    #[test]
    fn auth_key_prefers_anon() {
        let mut config = SupabaseConfig {
            service_role_key: Some("service".into()),
            ..Default::default()
        };
        assert_eq!(config.auth_api_key(), Some("service"));
        config.anon_key = Some("anon".into());
        assert_eq!(config.auth_api_key(), Some("anon"));
    }
}
