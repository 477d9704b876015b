//! Application configuration management.

use serde::Deserialize;
use std::path::PathBuf;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Data directory configuration.
    #[serde(default)]
    pub data: DataConfig,
    /// Admin authority configuration.
    pub admin: AdminConfig,
}

/// Where the wallet core persists its key-value records.
#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    /// Directory holding one JSON file per logical key.
    #[serde(default = "default_data_dir")]
    pub dir: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            dir: default_data_dir(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

/// Admin authority configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AdminConfig {
    /// The access code that opens the admin gate.
    pub access_code: String,
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenvy::dotenv().ok();

        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("MAISON").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
