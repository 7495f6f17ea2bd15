//! Cards API tests.

mod common;

use axum::http::StatusCode;
use common::{MOBILE, TestApp};
use pretty_assertions::assert_eq;
use serde_json::json;

#[tokio::test]
async fn create_then_fetch_returns_default_card() {
    let app = TestApp::new();

    let created = app
        .post(&format!("/api/cards/create?mobileNumber={MOBILE}"), None)
        .await;
    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(created.body["statusMessage"], "Card created successfully");

    let card = app
        .get(&format!("/api/cards/fetch?mobileNumber={MOBILE}"))
        .await
        .body;
    assert_eq!(card["cardType"], "Credit Card");
    assert_eq!(card["totalLimit"], 100_000);
    assert_eq!(card["amountUsed"], 0);
    assert_eq!(card["availableAmount"], 100_000);
    assert_eq!(card["cardNumber"].as_str().unwrap().len(), 12);
}

#[tokio::test]
async fn second_card_for_same_mobile_is_rejected() {
    let app = TestApp::new();
    let uri = format!("/api/cards/create?mobileNumber={MOBILE}");
    app.post(&uri, None).await;

    let second = app.post(&uri, None).await;

    assert_eq!(second.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        second.body["errorMessage"],
        "Card already registered with given mobileNumber 9876543210"
    );
}

#[tokio::test]
async fn update_recomputes_available_amount() {
    let app = TestApp::new();
    app.post(&format!("/api/cards/create?mobileNumber={MOBILE}"), None)
        .await;
    let mut card = app
        .get(&format!("/api/cards/fetch?mobileNumber={MOBILE}"))
        .await
        .body;
    card["amountUsed"] = json!(2_500);
    card["availableAmount"] = json!(0);

    let response = app.put("/api/cards/update", card).await;
    assert_eq!(response.status, StatusCode::OK);

    let after = app
        .get(&format!("/api/cards/fetch?mobileNumber={MOBILE}"))
        .await
        .body;
    assert_eq!(after["amountUsed"], 2_500);
    assert_eq!(after["availableAmount"], 97_500);
}

#[tokio::test]
async fn update_of_unknown_card_is_not_found() {
    let app = TestApp::new();

    let response = app
        .put(
            "/api/cards/update",
            json!({
                "mobileNumber": MOBILE,
                "cardNumber": "100000000042",
                "cardType": "Credit Card",
                "totalLimit": 1000,
                "amountUsed": 0
            }),
        )
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["apiPath"], "uri=/api/cards/update");
    assert_eq!(response.body["errorCode"], "NOT_FOUND");
}

#[tokio::test]
async fn delete_then_fetch_is_not_found() {
    let app = TestApp::new();
    app.post(&format!("/api/cards/create?mobileNumber={MOBILE}"), None)
        .await;

    let deleted = app
        .delete(&format!("/api/cards/delete?mobileNumber={MOBILE}"))
        .await;
    assert_eq!(deleted.status, StatusCode::OK);

    let fetched = app
        .get(&format!("/api/cards/fetch?mobileNumber={MOBILE}"))
        .await;
    assert_eq!(fetched.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_with_missing_field_gets_error_body() {
    let app = TestApp::new();

    let response = app
        .put(
            "/api/cards/update",
            json!({
                "mobileNumber": MOBILE,
                "cardType": "Credit Card",
                "totalLimit": 1000,
                "amountUsed": 0
            }),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["apiPath"], "uri=/api/cards/update");
    assert_eq!(response.body["errorCode"], "BAD_REQUEST");
    assert!(
        response.body["errorMessage"]
            .as_str()
            .unwrap()
            .contains("cardNumber")
    );
    assert!(response.body["errorTime"].is_string());
}

#[tokio::test]
async fn create_without_mobile_number_gets_error_body() {
    let app = TestApp::new();

    let response = app.post("/api/cards/create", None).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["apiPath"], "uri=/api/cards/create");
    assert_eq!(response.body["errorCode"], "BAD_REQUEST");
    assert!(
        response.body["errorMessage"]
            .as_str()
            .unwrap()
            .contains("mobileNumber")
    );
}
