use std::env;
use std::path::PathBuf;

use serde::Deserialize;

/// Storage key the session blob is written under.
pub const DEFAULT_STORAGE_NAME: &str = "top10-game-storage";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub data_dir: PathBuf,
    pub storage_name: String,
    pub catalog_path: Option<PathBuf>,
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenvy::dotenv().ok();

        // Determine environment (defaults to dev)
        let env = env::var("APP_ENV").unwrap_or_else(|_| "dev".to_string());

        // Build configuration from config/*.toml + ENV overrides
        let config_builder = config::Config::builder()
            .add_source(
                config::File::with_name(&format!("config/{}", env)).required(false), // Allow missing config file, fallback to ENV
            )
            // Override with environment variables (prefix: APP_)
            .add_source(config::Environment::with_prefix("APP").separator("__"));

        let settings = config_builder.build()?;

        let data_dir = settings
            .get_string("storage.data_dir")
            .or_else(|_| env::var("DATA_DIR"))
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("."));

        let storage_name = settings
            .get_string("storage.name")
            .or_else(|_| env::var("STORAGE_NAME"))
            .unwrap_or_else(|_| DEFAULT_STORAGE_NAME.to_string());

        let catalog_path = settings
            .get_string("catalog.path")
            .ok()
            .or_else(|| env::var("CATALOG_PATH").ok())
            .map(PathBuf::from);

        Ok(Config {
            data_dir,
            storage_name,
            catalog_path,
        })
    }
}
