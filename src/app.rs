use axum::{
    extract::State,
    response::Json,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::error;

use crate::config::AppConfig;
use crate::database::Database;
use crate::webhooks::dialogflow;

pub const SERVICE_NAME: &str = "eco-violation-bot";

pub fn build_router(config: AppConfig, database: Database) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/health", get(health_check))
        .route("/status", get(status_endpoint))
        .route("/webhook", post(dialogflow::handle_webhook))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .into_inner(),
        )
        .with_state((config, database))
}

async fn home() -> &'static str {
    "Eco Violation Bot Webhook Server is running!"
}

async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "message": "Eco Bot Webhook is running",
        "service": SERVICE_NAME,
        "timestamp": chrono::Utc::now()
    }))
}

async fn status_endpoint(
    State((config, database)): State<(AppConfig, Database)>,
) -> Json<serde_json::Value> {
    let mut status = serde_json::json!({
        "status": "healthy",
        "service": SERVICE_NAME,
        "timestamp": chrono::Utc::now(),
        "features": {
            "custom_catalog": config.catalog_path.is_some()
        }
    });

    match database.count_violations().await {
        Ok(count) => {
            status["catalog"] = serde_json::json!({
                "status": "healthy",
                "violations": count
            });
        }
        Err(e) => {
            error!("Failed to read violation catalog: {}", e);
            status["catalog"] = serde_json::json!({
                "status": "error"
            });
        }
    }

    Json(status)
}
