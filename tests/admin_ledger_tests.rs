use axum::http::StatusCode;
use rust_decimal_macros::dec;
use serde_json::json;

use tsbgate::testkit::fixture::{Fixture, ADMIN_TOKEN, ROOT_ID, ROOT_TOKEN, USER_ID};
use tsbgate::testkit::http::{get, post};

#[tokio::test]
async fn adjust_credits_wallet_and_writes_audit() {
    let fixture = Fixture::new().with_balance(USER_ID, dec!(100));
    let router = fixture.router();

    let response = post(
        &router,
        "/api/admin/ledger/adjust",
        Some(ROOT_TOKEN),
        &json!({ "user_id": USER_ID, "amount": 25, "reason": "support credit" }),
    )
    .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["transaction"]["balance"], "125");
    assert!(response.body["transaction"]["tx_id"].is_string());
    assert_eq!(fixture.balance(USER_ID), dec!(125));

    let audit = fixture.backend.audit_entries();
    assert_eq!(audit.len(), 1);
    assert_eq!(audit[0].actor_id.as_str(), ROOT_ID);
    assert_eq!(audit[0].target_id.as_deref(), Some(USER_ID));
}

#[tokio::test]
async fn adjust_requires_reason_and_non_zero_amount() {
    let fixture = Fixture::new();
    let router = fixture.router();

    let response = post(
        &router,
        "/api/admin/ledger/adjust",
        Some(ROOT_TOKEN),
        &json!({ "user_id": USER_ID, "amount": 5 }),
    )
    .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), Some("INVALID_REASON"));

    let response = post(
        &router,
        "/api/admin/ledger/adjust",
        Some(ROOT_TOKEN),
        &json!({ "user_id": USER_ID, "amount": 0, "reason": "noop" }),
    )
    .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), Some("INVALID_AMOUNT"));

    assert!(fixture.backend.audit_entries().is_empty());
}

#[tokio::test]
async fn overdraft_is_rejected_with_unprocessable() {
    let fixture = Fixture::new().with_balance(USER_ID, dec!(10));
    let router = fixture.router();

    let response = post(
        &router,
        "/api/admin/ledger/adjust",
        Some(ROOT_TOKEN),
        &json!({ "user_id": USER_ID, "amount": -50, "reason": "chargeback" }),
    )
    .await;

    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(response.error_code(), Some("INSUFFICIENT_BALANCE"));
    assert_eq!(fixture.balance(USER_ID), dec!(10));
}

#[tokio::test]
async fn malformed_body_is_bad_request() {
    let router = Fixture::new().router();
    let response = post(
        &router,
        "/api/admin/ledger/adjust",
        Some(ROOT_TOKEN),
        &json!({ "user_id": USER_ID, "amount": "lots" }),
    )
    .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), Some("BAD_REQUEST"));
}

#[tokio::test]
async fn rollback_applies_opposite_amount_once() {
    let fixture = Fixture::new().with_balance(USER_ID, dec!(50));
    let router = fixture.router();

    let adjusted = post(
        &router,
        "/api/admin/ledger/adjust",
        Some(ROOT_TOKEN),
        &json!({ "user_id": USER_ID, "amount": 30, "reason": "promo" }),
    )
    .await;
    let tx_id = adjusted.body["transaction"]["tx_id"]
        .as_str()
        .expect("tx id")
        .to_string();
    assert_eq!(fixture.balance(USER_ID), dec!(80));

    let rollback = post(
        &router,
        "/api/admin/ledger/rollback",
        Some(ROOT_TOKEN),
        &json!({ "tx_id": tx_id, "reason": "sent twice" }),
    )
    .await;
    assert_eq!(rollback.status, StatusCode::OK);
    assert_eq!(rollback.body["transaction"]["balance"], "50");
    assert_eq!(rollback.body["rolled_back"]["id"], tx_id.as_str());
    assert_eq!(fixture.balance(USER_ID), dec!(50));

    let again = post(
        &router,
        "/api/admin/ledger/rollback",
        Some(ROOT_TOKEN),
        &json!({ "tx_id": tx_id }),
    )
    .await;
    assert_eq!(again.status, StatusCode::CONFLICT);
    assert_eq!(again.error_code(), Some("ALREADY_ROLLED_BACK"));
    assert_eq!(fixture.balance(USER_ID), dec!(50));

    let ledger = get(
        &router,
        &format!("/api/admin/ledger?user_id={USER_ID}"),
        Some(ADMIN_TOKEN),
    )
    .await;
    let rows = ledger.body["transactions"].as_array().expect("rows");
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["kind"], "rollback");
    assert_eq!(rows[0]["ref_id"], tx_id.as_str());
    assert_eq!(rows[0]["amount"], "-30");
}

#[tokio::test]
async fn rollback_of_a_rollback_is_refused() {
    let fixture = Fixture::new();
    let router = fixture.router();

    let adjusted = post(
        &router,
        "/api/admin/ledger/adjust",
        Some(ROOT_TOKEN),
        &json!({ "user_id": USER_ID, "amount": 5, "reason": "gift" }),
    )
    .await;
    let tx_id = adjusted.body["transaction"]["tx_id"].as_str().unwrap().to_string();
    let first = post(
        &router,
        "/api/admin/ledger/rollback",
        Some(ROOT_TOKEN),
        &json!({ "tx_id": tx_id }),
    )
    .await;
    let reversal_id = first.body["transaction"]["tx_id"].as_str().unwrap().to_string();

    let response = post(
        &router,
        "/api/admin/ledger/rollback",
        Some(ROOT_TOKEN),
        &json!({ "tx_id": reversal_id }),
    )
    .await;
    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.error_code(), Some("TX_NOT_REVERSIBLE"));
}

#[tokio::test]
async fn rollback_validates_tx_id() {
    let router = Fixture::new().router();

    let blank = post(
        &router,
        "/api/admin/ledger/rollback",
        Some(ROOT_TOKEN),
        &json!({ "tx_id": "  " }),
    )
    .await;
    assert_eq!(blank.status, StatusCode::BAD_REQUEST);
    assert_eq!(blank.error_code(), Some("INVALID_TX_ID"));

    let unknown = post(
        &router,
        "/api/admin/ledger/rollback",
        Some(ROOT_TOKEN),
        &json!({ "tx_id": "does-not-exist" }),
    )
    .await;
    assert_eq!(unknown.status, StatusCode::NOT_FOUND);
    assert_eq!(unknown.error_code(), Some("TX_NOT_FOUND"));
}

#[tokio::test]
async fn audit_failure_does_not_fail_the_mutation() {
    let fixture = Fixture::new();
    fixture.backend.fail_audit_writes(true);
    let router = fixture.router();

    let response = post(
        &router,
        "/api/admin/ledger/adjust",
        Some(ROOT_TOKEN),
        &json!({ "user_id": USER_ID, "amount": 7, "reason": "refund" }),
    )
    .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(fixture.balance(USER_ID), dec!(7));
    assert!(fixture.backend.audit_entries().is_empty());
}

#[tokio::test]
async fn audit_log_lists_newest_first() {
    let fixture = Fixture::new();
    let router = fixture.router();

    for reason in ["first", "second"] {
        post(
            &router,
            "/api/admin/ledger/adjust",
            Some(ROOT_TOKEN),
            &json!({ "user_id": USER_ID, "amount": 1, "reason": reason }),
        )
        .await;
    }

    let response = get(&router, "/api/admin/audit-logs?limit=1", Some(ROOT_TOKEN)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["limit"], 1);
    let entries = response.body["entries"].as_array().expect("entries");
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["action"], "ledger.adjust");
    assert_eq!(entries[0]["detail"]["reason"], "second");
}

#[tokio::test]
async fn balance_overflow_fails_cleanly() {
    let fixture = Fixture::new();
    let router = fixture.router();
    let body = json!({
        "user_id": USER_ID,
        "amount": "79228162514264337593543950335",
        "reason": "max credit",
    });

    let first = post(&router, "/api/admin/ledger/adjust", Some(ROOT_TOKEN), &body).await;
    assert_eq!(first.status, StatusCode::OK);

    let second = post(&router, "/api/admin/ledger/adjust", Some(ROOT_TOKEN), &body).await;
    assert_eq!(second.status, StatusCode::BAD_GATEWAY);
    assert_eq!(second.error_code(), Some("LEDGER_APPLY_FAILED"));
    assert_eq!(fixture.balance(USER_ID), rust_decimal::Decimal::MAX);
}
