//! Dialogflow fulfillment webhook.
//!
//! The platform treats any non-200 answer as an outage, so every outcome,
//! including malformed payloads and internal failures, is a 200 response with
//! a `fulfillmentText`.

use axum::{body::Bytes, extract::State, response::Json};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use tracing::{error, info, warn};

use crate::classifier::ViolationClassifier;
use crate::config::AppConfig;
use crate::database::models::ViolationRecord;
use crate::database::Database;
use crate::error::EcoBotError;
use crate::webhooks::reply;

pub const DESCRIPTION_PARAMETER: &str = "violation_description";

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookRequest {
    #[serde(default)]
    pub query_result: Option<QueryResult>,
}

#[derive(Debug, Default, Deserialize)]
pub struct QueryResult {
    #[serde(default)]
    pub intent: Option<IntentInfo>,
    #[serde(default)]
    pub parameters: Option<HashMap<String, Value>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntentInfo {
    #[serde(default)]
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookResponse {
    #[serde(rename = "fulfillmentText")]
    pub fulfillment_text: String,
}

impl WebhookResponse {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            fulfillment_text: text.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    ClassifyViolation,
    ViolationPunishment,
    ViolationAuthority,
    Unknown(String),
}

impl Intent {
    pub fn from_display_name(name: &str) -> Self {
        match name {
            "classify_violation" => Intent::ClassifyViolation,
            "violation_punishment" => Intent::ViolationPunishment,
            "violation_authority" => Intent::ViolationAuthority,
            other => Intent::Unknown(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Intent::ClassifyViolation => "classify_violation",
            Intent::ViolationPunishment => "violation_punishment",
            Intent::ViolationAuthority => "violation_authority",
            Intent::Unknown(name) => name,
        }
    }
}

impl WebhookRequest {
    pub fn intent(&self) -> Intent {
        let name = self
            .query_result
            .as_ref()
            .and_then(|q| q.intent.as_ref())
            .and_then(|i| i.display_name.as_deref())
            .unwrap_or("");
        Intent::from_display_name(name)
    }

    /// `Ok(None)` when the description is absent or falsy. Dialogflow sends
    /// `[]` for an unfilled list parameter.
    pub fn description(&self) -> Result<Option<&str>, EcoBotError> {
        let value = self
            .query_result
            .as_ref()
            .and_then(|q| q.parameters.as_ref())
            .and_then(|p| p.get(DESCRIPTION_PARAMETER));

        match value {
            None => Ok(None),
            Some(v) if is_falsy(v) => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.as_str())),
            Some(other) => Err(EcoBotError::unsupported_parameter(DESCRIPTION_PARAMETER, other)),
        }
    }
}

pub async fn handle_webhook(
    State((_, database)): State<(AppConfig, Database)>,
    body: Bytes,
) -> Json<WebhookResponse> {
    let classifier = ViolationClassifier::new(database);
    Json(WebhookResponse::text(process_webhook(&classifier, &body).await))
}

/// Turns a raw request body into the reply text.
pub async fn process_webhook(classifier: &ViolationClassifier, body: &[u8]) -> String {
    let payload: Value = match serde_json::from_slice(body) {
        Ok(payload) => payload,
        Err(e) => {
            warn!("Unreadable webhook body: {}", e);
            return reply::EMPTY_REQUEST.to_string();
        }
    };

    if is_falsy(&payload) {
        warn!("Empty webhook payload");
        return reply::EMPTY_REQUEST.to_string();
    }

    match respond(classifier, payload).await {
        Ok(text) => text,
        Err(e) => {
            error!("Webhook processing failed: {}", e);
            reply::INTERNAL_ERROR.to_string()
        }
    }
}

/// Null, `false`, zero, and empty strings, arrays or objects.
fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}

async fn respond(classifier: &ViolationClassifier, payload: Value) -> Result<String, EcoBotError> {
    if !payload.is_object() {
        return Err(EcoBotError::WebhookError(
            "Webhook payload must be a JSON object".to_string(),
        ));
    }
    let request: WebhookRequest = serde_json::from_value(payload)?;
    let intent = request.intent();
    info!("Received webhook for intent '{}'", intent.as_str());

    let format: fn(&ViolationRecord) -> String = match intent {
        Intent::ClassifyViolation => reply::classification,
        Intent::ViolationPunishment => reply::punishment,
        Intent::ViolationAuthority => reply::authority,
        Intent::Unknown(name) => {
            warn!("Unhandled intent: '{}'", name);
            return Ok(reply::FALLBACK.to_string());
        }
    };

    let description = match request.description()? {
        Some(description) => description,
        None => return Ok(reply::DESCRIBE_PROMPT.to_string()),
    };

    match classifier.classify(description).await? {
        Some(found) => {
            info!(
                "Description classified as '{}' (score {})",
                found.violation.violation_type, found.score
            );
            Ok(format(&found.violation))
        }
        None => {
            info!("Description could not be classified");
            Ok(reply::unclassified(description))
        }
    }
}
