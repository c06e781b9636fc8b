#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use eco_violation_bot::app::build_router;
use eco_violation_bot::catalog::default_catalog;
use eco_violation_bot::config::AppConfig;
use eco_violation_bot::database::Database;
use serde_json::Value;
use tower::ServiceExt;

/// In-memory database seeded with the built-in catalog
pub async fn setup_test_db() -> Database {
    let db = Database::new_in_memory()
        .await
        .expect("Failed to create test database");
    db.seed_violations(&default_catalog())
        .await
        .expect("Failed to seed test database");
    db
}

pub async fn test_app() -> Router {
    build_router(AppConfig::default(), setup_test_db().await)
}

pub async fn get(app: Router, uri: &str) -> (StatusCode, Vec<u8>) {
    let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, req).await
}

pub async fn post_raw(app: Router, body: impl Into<Body>) -> (StatusCode, Vec<u8>) {
    let req = Request::builder()
        .method("POST")
        .uri("/webhook")
        .header("content-type", "application/json")
        .body(body.into())
        .unwrap();
    send(app, req).await
}

/// Posts a payload and returns the status and `fulfillmentText`
pub async fn post_webhook(app: Router, payload: &Value) -> (StatusCode, String) {
    let (status, body) = post_raw(app, payload.to_string()).await;
    (status, fulfillment_text(&body))
}

pub fn fulfillment_text(body: &[u8]) -> String {
    let value: Value = serde_json::from_slice(body).expect("response is JSON");
    value["fulfillmentText"]
        .as_str()
        .expect("fulfillmentText is a string")
        .to_string()
}

async fn send(app: Router, req: Request<Body>) -> (StatusCode, Vec<u8>) {
    let resp = app.oneshot(req).await.unwrap();
    let status = resp.status();
    let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, body.to_vec())
}

/// Mock Dialogflow webhook payloads
pub mod dialogflow_mocks {
    use serde_json::Value;

    pub fn intent_payload(intent: &str, description: Option<&str>) -> Value {
        let parameters = match description {
            Some(description) => serde_json::json!({ "violation_description": description }),
            None => serde_json::json!({}),
        };
        serde_json::json!({
            "responseId": "test-response-id",
            "session": "projects/eco-bot/agent/sessions/test-session",
            "queryResult": {
                "queryText": description.unwrap_or(""),
                "intent": {
                    "name": "projects/eco-bot/agent/intents/0000",
                    "displayName": intent
                },
                "parameters": parameters,
                "languageCode": "ru"
            }
        })
    }

    pub fn classify_payload(description: &str) -> Value {
        intent_payload("classify_violation", Some(description))
    }
}
