use serde::Deserialize;
use std::env;
use std::path::PathBuf;
use tutora_shared::Masked;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default)]
    pub redis: RedisConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    pub auth: AuthConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

/// Remote pricing document. Without a `url` the service runs on the local
/// cache alone.
#[derive(Debug, Deserialize, Clone)]
pub struct RedisConfig {
    pub url: Option<String>,
    #[serde(default = "default_document_key")]
    pub document_key: String,
}

impl Default for RedisConfig {
    fn default() -> Self {
        Self {
            url: None,
            document_key: default_document_key(),
        }
    }
}

fn default_document_key() -> String {
    "app_config:pricing_v1".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct CacheConfig {
    #[serde(default = "default_cache_path")]
    pub path: PathBuf,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { path: default_cache_path() }
    }
}

fn default_cache_path() -> PathBuf {
    PathBuf::from("data/admin-pricing-config-v1.json")
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    pub jwt_secret: Masked<String>,
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from("config")
    }

    /// Layering: `default`, then `{RUN_MODE}`, then `local`, then `TUTORA__*`
    /// environment variables.
    pub fn load_from(dir: &str) -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            .add_source(config::File::with_name(&format!("{}/default", dir)))
            .add_source(config::File::with_name(&format!("{}/{}", dir, run_mode)).required(false))
            // Not checked in
            .add_source(config::File::with_name(&format!("{}/local", dir)).required(false))
            // e.g. TUTORA_REDIS__URL=redis://cache:6379
            .add_source(config::Environment::with_prefix("TUTORA").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
