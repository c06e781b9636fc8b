use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

use crate::error::EcoBotError;

pub const DEFAULT_PORT: u16 = 10000;
pub const DEFAULT_DATABASE_URL: &str = "sqlite://eco_violations.db";
const CONFIG_FILE_STEM: &str = "eco_violation_bot";
const ENV_KEYS: [&str; 4] = ["PORT", "HOST", "DATABASE_URL", "CATALOG_PATH"];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    /// YAML seed file replacing the built-in catalog.
    #[serde(default)]
    pub catalog_path: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
            database_url: DEFAULT_DATABASE_URL.to_string(),
            catalog_path: None,
        }
    }
}

impl AppConfig {
    /// Defaults, then `eco_violation_bot.{toml,yaml,json}` if present, then
    /// `PORT`, `HOST`, `DATABASE_URL` and `CATALOG_PATH` from the environment.
    pub fn load() -> Result<Self, EcoBotError> {
        let vars: config::Map<String, String> = ENV_KEYS
            .iter()
            .filter_map(|key| env::var(key).ok().map(|value| (key.to_string(), value)))
            .collect();

        Self::load_from(
            config::File::with_name(CONFIG_FILE_STEM).required(false),
            vars,
        )
    }

    pub fn load_from<S>(file: S, vars: config::Map<String, String>) -> Result<Self, EcoBotError>
    where
        S: config::Source + Send + Sync + 'static,
    {
        let defaults = AppConfig::default();

        let settings = config::Config::builder()
            .set_default("host", defaults.host)?
            .set_default("port", defaults.port as i64)?
            .set_default("database_url", defaults.database_url)?
            .add_source(file)
            .add_source(
                config::Environment::default()
                    .source(Some(vars))
                    .try_parsing(true),
            )
            .build()?;

        let config: AppConfig = settings.try_deserialize()?;
        if config.port == 0 {
            return Err(EcoBotError::ConfigError(
                "PORT must be a non-zero port number".to_string(),
            ));
        }
        Ok(config)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
