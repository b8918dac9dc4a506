use axum::http::StatusCode;

use tsbgate::testkit::fixture::Fixture;
use tsbgate::testkit::http::get;

#[tokio::test]
async fn healthz_reports_backend_without_auth() {
    let router = Fixture::new().router();
    let response = get(&router, "/healthz", None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
    assert_eq!(response.body["backend"], "memory");
    assert_eq!(response.body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn unknown_route_returns_json_error() {
    let router = Fixture::new().router();
    let response = get(&router, "/api/nope", None).await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.error_code(), Some("NOT_FOUND"));
}
