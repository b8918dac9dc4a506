use axum::http::StatusCode;
use serde_json::json;

use tsbgate::application::ServiceSettings;
use tsbgate::domain::Role;
use tsbgate::testkit::fixture::{
    Fixture, ADMIN_TOKEN, MODERATOR_TOKEN, ORPHAN_TOKEN, ROOT_TOKEN, USER_ID, USER_TOKEN,
};
use tsbgate::testkit::http::{get, post};

#[tokio::test]
async fn missing_token_is_unauthorized() {
    let router = Fixture::new().router();
    let response = get(&router, "/api/admin/users", None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.error_code(), Some("UNAUTHORIZED"));
    assert!(response.body["detail"].is_string());
}

#[tokio::test]
async fn unknown_token_is_unauthorized() {
    let router = Fixture::new().router();
    let response = get(&router, "/api/tsb/wallet", Some("forged")).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.error_code(), Some("UNAUTHORIZED"));
}

#[tokio::test]
async fn session_without_profile_is_rejected() {
    let router = Fixture::new().router();
    let response = get(&router, "/api/admin/users", Some(ORPHAN_TOKEN)).await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.error_code(), Some("PROFILE_NOT_FOUND"));
}

#[tokio::test]
async fn read_views_accept_configured_admin_roles() {
    let router = Fixture::new().router();

    for token in [ROOT_TOKEN, ADMIN_TOKEN] {
        let response = get(&router, "/api/admin/users", Some(token)).await;
        assert_eq!(response.status, StatusCode::OK, "token {token}");
    }
    for token in [MODERATOR_TOKEN, USER_TOKEN] {
        let response = get(&router, "/api/admin/ledger", Some(token)).await;
        assert_eq!(response.status, StatusCode::FORBIDDEN, "token {token}");
        assert_eq!(response.error_code(), Some("FORBIDDEN"));
    }
}

#[tokio::test]
async fn admin_role_list_follows_settings() {
    let settings = ServiceSettings {
        admin_roles: vec![Role::RootAdmin, Role::Admin, Role::Moderator],
        ..ServiceSettings::default()
    };
    let router = Fixture::with_settings(&settings).router();

    let response = get(&router, "/api/admin/users", Some(MODERATOR_TOKEN)).await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn mutations_are_root_admin_only() {
    let fixture = Fixture::new();
    let router = fixture.router();
    let body = json!({ "user_id": USER_ID, "amount": 10, "reason": "bonus" });

    let response = post(&router, "/api/admin/ledger/adjust", Some(ADMIN_TOKEN), &body).await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.error_code(), Some("FORBIDDEN"));

    let response = get(&router, "/api/admin/audit-logs", Some(ADMIN_TOKEN)).await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    assert!(fixture.backend.audit_entries().is_empty());
}

#[tokio::test]
async fn guard_runs_before_body_parsing() {
    let router = Fixture::new().router();
    let response = post(
        &router,
        "/api/admin/ledger/adjust",
        None,
        &json!({ "unexpected": true }),
    )
    .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}
