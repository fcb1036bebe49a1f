//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    pub server: ServerConfig,
    /// Database configuration.
    pub database: DatabaseConfig,
    /// Blob storage configuration.
    pub storage: StorageSettings,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_max_connections() -> u32 {
    10
}

/// Blob storage settings.
///
/// `provider` selects the backend: `"s3"` for any S3-compatible service
/// (Supabase Storage, Cloudflare R2, AWS S3) or `"local"` for the
/// filesystem during development.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    /// Storage backend: "s3" or "local".
    #[serde(default = "default_provider")]
    pub provider: String,
    /// Base URL under which stored objects are publicly reachable.
    pub public_base_url: String,
    /// Local filesystem root (provider = "local").
    #[serde(default = "default_local_root")]
    pub local_root: String,
    /// S3 endpoint URL (provider = "s3").
    #[serde(default)]
    pub endpoint: String,
    /// S3 bucket name (provider = "s3").
    #[serde(default)]
    pub bucket: String,
    /// S3 access key id (provider = "s3").
    #[serde(default)]
    pub access_key_id: String,
    /// S3 secret access key (provider = "s3").
    #[serde(default)]
    pub secret_access_key: String,
    /// S3 region (provider = "s3").
    #[serde(default = "default_region")]
    pub region: String,
    /// Maximum attachment size in bytes.
    #[serde(default = "default_max_file_size")]
    pub max_file_size: u64,
}

fn default_provider() -> String {
    "local".to_string()
}

fn default_local_root() -> String {
    "./storage".to_string()
}

fn default_region() -> String {
    "auto".to_string()
}

fn default_max_file_size() -> u64 {
    10 * 1024 * 1024
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
            .add_source(config::Environment::with_prefix("DESPACHO").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        assert_eq!(default_host(), "0.0.0.0");
        assert_eq!(default_port(), 8080);
        assert_eq!(default_max_connections(), 10);
        assert_eq!(default_provider(), "local");
        assert_eq!(default_max_file_size(), 10 * 1024 * 1024);
    }
}
