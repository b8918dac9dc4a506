//! One-shot request helpers for the axum router.

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

/// Status and decoded body of a test request.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    /// `Value::Null` for an empty body, `Value::String` for non-JSON text.
    pub body: Value,
}

impl TestResponse {
    /// The `error` code of an error body.
    #[must_use]
    pub fn error_code(&self) -> Option<&str> {
        self.body.get("error").and_then(Value::as_str)
    }
}

/// Send one request through `router`.
pub async fn send(
    router: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<&Value>,
) -> TestResponse {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("valid test request");

    let response = router
        .clone()
        .oneshot(request)
        .await
        .expect("router is infallible");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("readable body");

    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };
    TestResponse { status, body }
}

pub async fn get(router: &Router, uri: &str, token: Option<&str>) -> TestResponse {
    send(router, Method::GET, uri, token, None).await
}

pub async fn post(router: &Router, uri: &str, token: Option<&str>, body: &Value) -> TestResponse {
    send(router, Method::POST, uri, token, Some(body)).await
}

pub async fn patch(router: &Router, uri: &str, token: Option<&str>, body: &Value) -> TestResponse {
    send(router, Method::PATCH, uri, token, Some(body)).await
}
