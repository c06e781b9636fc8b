use thiserror::Error;

impl From<serde_json::Error> for EcoBotError {
    fn from(err: serde_json::Error) -> Self {
        Self::WebhookError(format!("JSON error: {}", err))
    }
}

impl From<sqlx::Error> for EcoBotError {
    fn from(err: sqlx::Error) -> Self {
        Self::DatabaseError(format!("Database error: {}", err))
    }
}

impl From<config::ConfigError> for EcoBotError {
    fn from(err: config::ConfigError) -> Self {
        Self::ConfigError(err.to_string())
    }
}

#[derive(Error, Debug)]
pub enum EcoBotError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Catalog error: {0}")]
    CatalogError(String),

    #[error("Webhook processing error: {0}")]
    WebhookError(String),
}

impl EcoBotError {
    pub fn unsupported_parameter(name: &str, found: &serde_json::Value) -> Self {
        let kind = match found {
            serde_json::Value::Bool(_) => "boolean",
            serde_json::Value::Number(_) => "number",
            serde_json::Value::Array(_) => "array",
            serde_json::Value::Object(_) => "object",
            serde_json::Value::String(_) => "string",
            serde_json::Value::Null => "null",
        };
        Self::WebhookError(format!(
            "Parameter '{}' must be a string, got {}",
            name, kind
        ))
    }

    pub fn empty_catalog_entry(field: &str, index: usize) -> Self {
        Self::CatalogError(format!(
            "Catalog entry #{} has an empty '{}' field",
            index + 1,
            field
        ))
    }
}
