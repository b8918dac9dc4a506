use axum::http::StatusCode;
use rust_decimal_macros::dec;
use serde_json::json;

use tsbgate::testkit::fixture::{Fixture, ORPHAN_TOKEN, ROOT_TOKEN, USER_ID, USER_TOKEN};
use tsbgate::testkit::http::{get, post};

#[tokio::test]
async fn missing_wallet_reads_as_zero() {
    let router = Fixture::new().router();
    let response = get(&router, "/api/tsb/wallet", Some(USER_TOKEN)).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["wallet"]["user_id"], USER_ID);
    assert_eq!(response.body["wallet"]["balance"], "0");
    assert_eq!(response.body["recent"].as_array().map(Vec::len), Some(0));
}

#[tokio::test]
async fn wallet_shows_balance_and_recent_transactions() {
    let fixture = Fixture::new().with_balance(USER_ID, dec!(10));
    let router = fixture.router();
    post(
        &router,
        "/api/admin/ledger/adjust",
        Some(ROOT_TOKEN),
        &json!({ "user_id": USER_ID, "amount": 2.5, "reason": "tip" }),
    )
    .await;

    let response = get(&router, "/api/tsb/wallet", Some(USER_TOKEN)).await;
    assert_eq!(response.body["wallet"]["balance"], "12.5");
    let recent = response.body["recent"].as_array().expect("recent");
    assert_eq!(recent.len(), 1);
    assert_eq!(recent[0]["kind"], "adjustment");
}

#[tokio::test]
async fn transactions_are_scoped_to_the_caller() {
    let fixture = Fixture::new();
    let router = fixture.router();
    for user in [USER_ID, "root-1"] {
        post(
            &router,
            "/api/admin/ledger/adjust",
            Some(ROOT_TOKEN),
            &json!({ "user_id": user, "amount": 3, "reason": "airdrop" }),
        )
        .await;
    }

    let response = get(&router, "/api/tsb/transactions", Some(USER_TOKEN)).await;
    assert_eq!(response.status, StatusCode::OK);
    let rows = response.body["transactions"].as_array().expect("rows");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["user_id"], USER_ID);
}

#[tokio::test]
async fn wallet_requires_a_profile() {
    let router = Fixture::new().router();
    let response = get(&router, "/api/tsb/wallet", Some(ORPHAN_TOKEN)).await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.error_code(), Some("PROFILE_NOT_FOUND"));
}
