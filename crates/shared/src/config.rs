//! Application configuration management.

use serde::Deserialize;
use std::path::PathBuf;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Snapshot store configuration.
    pub store: StoreSettings,
}

/// Snapshot store configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct StoreSettings {
    /// Root directory for the local mirror.
    #[serde(default = "default_local_root")]
    pub local_root: PathBuf,
    /// Remote document store; absent means local-only operation.
    #[serde(default)]
    pub remote: Option<RemoteSettings>,
}

fn default_local_root() -> PathBuf {
    PathBuf::from("./data")
}

/// S3-compatible remote document store settings.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteSettings {
    /// Endpoint URL.
    pub endpoint: String,
    /// Bucket name.
    pub bucket: String,
    /// Access key ID.
    pub access_key_id: String,
    /// Secret access key.
    pub secret_access_key: String,
    /// Region.
    #[serde(default = "default_region")]
    pub region: String,
}

fn default_region() -> String {
    "auto".to_string()
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("KHATA").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
