//! Supabase REST client.
//!
//! Talks to two API surfaces of one project:
//! - **PostgREST** (`/rest/v1`) - table reads/writes and the `tsb_apply_tx` RPC,
//!   authenticated with the service-role key
//! - **GoTrue** (`/auth/v1`) - bearer-token verification

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::{Client as HttpClient, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use tokio::time::sleep;
use tracing::{debug, warn};
use url::Url;

use super::dto::ErrorBody;
use super::settings::SupabaseConfig;
use crate::domain::Page;
use crate::error::{BackendError, ConfigError, Result};

/// HTTP client for one Supabase project.
pub struct SupabaseClient {
    http: HttpClient,
    base_url: Url,
    service_key: String,
    auth_key: String,
    retry_max_attempts: u32,
    retry_backoff_ms: u64,
}

impl SupabaseClient {
    /// Build a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the project URL is missing or malformed
    /// or the service-role key is absent.
    pub fn from_config(config: &SupabaseConfig) -> Result<Self> {
        if config.url.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "backend.url",
            }
            .into());
        }
        let mut base_url = Url::parse(config.url.trim()).map_err(|e| ConfigError::InvalidValue {
            field: "backend.url",
            reason: e.to_string(),
        })?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let service_key = config
            .service_role_key
            .clone()
            .ok_or(ConfigError::MissingField {
                field: "SUPABASE_SERVICE_ROLE_KEY",
            })?;
        let auth_key = config
            .auth_api_key()
            .map_or_else(|| service_key.clone(), str::to_string);

        let http = HttpClient::builder()
            .timeout(Duration::from_millis(config.http.timeout_ms))
            .connect_timeout(Duration::from_millis(config.http.connect_timeout_ms))
            .build()
            .unwrap_or_else(|err| {
                warn!(error = %err, "Failed to build HTTP client, using defaults");
                HttpClient::new()
            });

        Ok(Self {
            http,
            base_url,
            service_key,
            auth_key,
            retry_max_attempts: config.http.retry_max_attempts,
            retry_backoff_ms: config.http.retry_backoff_ms,
        })
    }

    /// URL of a PostgREST table or RPC path, e.g. `profiles` or `rpc/tsb_apply_tx`.
    pub(crate) fn rest_url(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(&format!("rest/v1/{path}"))?)
    }

    pub(crate) fn auth_url(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(&format!("auth/v1/{path}"))?)
    }

    fn service_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        if let Ok(value) = HeaderValue::from_str(&self.service_key) {
            headers.insert("apikey", value);
        }
        if let Ok(value) = HeaderValue::from_str(&format!("Bearer {}", self.service_key)) {
            headers.insert(AUTHORIZATION, value);
        }
        headers
    }

    /// `GET /auth/v1/user` with the caller's token. `None` when GoTrue
    /// rejects the token.
    pub(crate) async fn get_auth_user<T>(&self, token: &str) -> Result<Option<T>>
    where
        T: DeserializeOwned,
    {
        let url = self.auth_url("user")?;
        let response = self
            .send_with_retry(|| {
                self.http
                    .get(url.clone())
                    .header("apikey", &self.auth_key)
                    .bearer_auth(token)
            })
            .await?;

        if matches!(
            response.status(),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN
        ) {
            debug!(status = %response.status(), "Token rejected by auth endpoint");
            return Ok(None);
        }
        let response = Self::check(response).await?;
        Ok(Some(Self::decode(response).await?))
    }

    /// Idempotent PostgREST read, retried on transient failures.
    pub(crate) async fn select<T>(&self, url: Url) -> Result<T>
    where
        T: DeserializeOwned,
    {
        debug!(url = %url, "Supabase select");
        let response = self
            .send_with_retry(|| self.http.get(url.clone()).headers(self.service_headers()))
            .await?;
        let response = Self::check(response).await?;
        Self::decode(response).await
    }

    /// PostgREST write or RPC call. Never retried.
    pub(crate) async fn post<B, T>(&self, url: Url, body: &B) -> Result<T>
    where
        B: serde::Serialize + ?Sized,
        T: DeserializeOwned,
    {
        debug!(url = %url, "Supabase post");
        let response = self
            .http
            .post(url)
            .headers(self.service_headers())
            .json(body)
            .send()
            .await?;
        let response = Self::check(response).await?;
        Self::decode(response).await
    }

    /// Insert without reading the row back.
    pub(crate) async fn insert<B>(&self, url: Url, body: &B) -> Result<()>
    where
        B: serde::Serialize + ?Sized,
    {
        let response = self
            .http
            .post(url)
            .headers(self.service_headers())
            .header("Prefer", "return=minimal")
            .json(body)
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    /// Update matching rows and return them.
    pub(crate) async fn patch<B, T>(&self, url: Url, body: &B) -> Result<T>
    where
        B: serde::Serialize + ?Sized,
        T: DeserializeOwned,
    {
        debug!(url = %url, "Supabase patch");
        let response = self
            .http
            .patch(url)
            .headers(self.service_headers())
            .header("Prefer", "return=representation")
            .json(body)
            .send()
            .await?;
        let response = Self::check(response).await?;
        Self::decode(response).await
    }

    async fn send_with_retry<F>(&self, build: F) -> Result<Response>
    where
        F: Fn() -> RequestBuilder,
    {
        let mut attempt = 0;
        let max_attempts = self.retry_max_attempts.max(1);

        loop {
            attempt += 1;
            match build().send().await {
                Ok(response) => return Ok(response),
                Err(err) => {
                    if attempt >= max_attempts || !Self::should_retry(&err) {
                        return Err(err.into());
                    }
                    self.backoff(attempt, max_attempts, &err).await;
                }
            }
        }
    }

    fn should_retry(err: &reqwest::Error) -> bool {
        err.is_timeout() || err.is_connect()
    }

    async fn backoff(&self, attempt: u32, max_attempts: u32, err: &reqwest::Error) {
        warn!(
            attempt,
            max_attempts,
            error = %err,
            "Supabase request failed, retrying"
        );
        if self.retry_backoff_ms > 0 {
            sleep(Duration::from_millis(self.retry_backoff_ms)).await;
        }
    }

    async fn check(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let text = response.text().await.unwrap_or_default();
        let body: ErrorBody = serde_json::from_str(&text).unwrap_or_default();
        let message = body
            .message()
            .unwrap_or_else(|| status.canonical_reason().unwrap_or("error").to_string());
        warn!(status = status.as_u16(), message = %message, "Supabase request failed");
        Err(BackendError::Status {
            status: status.as_u16(),
            code: body.code(),
            message,
        }
        .into())
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| BackendError::Decode(e.to_string()).into())
    }
}

/// Append `order`, `limit` and `offset` for a newest-first page.
pub(crate) fn newest_first(url: &mut Url, page: Page) {
    url.query_pairs_mut()
        .append_pair("order", "created_at.desc")
        .append_pair("limit", &page.limit.to_string())
        .append_pair("offset", &page.offset.to_string());
}

/// Append an `eq` filter.
pub(crate) fn eq(url: &mut Url, column: &str, value: &str) {
    url.query_pairs_mut()
        .append_pair(column, &format!("eq.{value}"));
}

/// PostgREST `or=(...)` filter matching `needle` against username and Pi uid.
///
/// Characters with meaning in PostgREST filter syntax are dropped. Returns
/// `None` when nothing searchable remains.
pub(crate) fn profile_search(needle: &str) -> Option<String> {
    let cleaned: String = needle
        .trim()
        .chars()
        .filter(|c| !matches!(c, ',' | '(' | ')' | '*' | '"' | '\\' | '%'))
        .collect();
    if cleaned.trim().is_empty() {
        return None;
    }
    let cleaned = cleaned.trim();
    Some(format!(
        "(username.ilike.*{cleaned}*,pi_uid.ilike.*{cleaned}*)"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(url: &str) -> SupabaseConfig {
        SupabaseConfig {
            url: url.into(),
            service_role_key: Some("service".into()),
            ..Default::default()
        }
    }

    #[test]
    fn missing_url_is_config_error() {
        let result = SupabaseClient::from_config(&config(""));
        assert!(matches!(
            result,
            Err(crate::error::Error::Config(ConfigError::MissingField { field: "backend.url" }))
        ));
    }

    #[test]
    fn missing_service_key_is_config_error() {
        let mut cfg = config("https://x.supabase.co");
        cfg.service_role_key = None;
        assert!(matches!(
            SupabaseClient::from_config(&cfg),
            Err(crate::error::Error::Config(ConfigError::MissingField { .. }))
        ));
    }

    #[test]
    fn urls_keep_project_path_prefix() {
        let client = SupabaseClient::from_config(&config("http://localhost:54321/proxy")).unwrap();
        assert_eq!(
            client.rest_url("rpc/tsb_apply_tx").unwrap().as_str(),
            "http://localhost:54321/proxy/rest/v1/rpc/tsb_apply_tx"
        );
        assert_eq!(
            client.auth_url("user").unwrap().as_str(),
            "http://localhost:54321/proxy/auth/v1/user"
        );
    }

    #[test]
    fn filters_are_appended_as_query_pairs() {
        let mut url = Url::parse("https://x.supabase.co/rest/v1/tsb_transactions").unwrap();
        eq(&mut url, "user_id", "u-1");
        newest_first(&mut url, Page::new(Some(10), Some(20)));
        assert_eq!(
            url.query(),
            Some("user_id=eq.u-1&order=created_at.desc&limit=10&offset=20")
        );
    }

    #[test]
    fn profile_search_strips_filter_syntax() {
        assert_eq!(
            profile_search(" al,i(ce) ").as_deref(),
            Some("(username.ilike.*alice*,pi_uid.ilike.*alice*)")
        );
        assert_eq!(profile_search("(*)"), None);
    }
}
