//! Application configuration with layered loading.
//!
//! This module provides configuration management using figment for layered
//! configuration loading from multiple sources:
//!
//! 1. Environment variables (BOLOGNA_PRECIP_*)
//! 2. TOML config file (if BOLOGNA_PRECIP_CONFIG_FILE set)
//! 3. Bare `REDIS_HOST` / `REDIS_PORT` variables
//! 4. Built-in defaults

use std::path::PathBuf;
use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

mod validation;

pub use validation::ConfigError;

/// Environment variable prefix for all settings.
pub const ENV_PREFIX: &str = "BOLOGNA_PRECIP_";

/// Environment variable naming an optional TOML config file.
pub const CONFIG_FILE_ENV: &str = "BOLOGNA_PRECIP_CONFIG_FILE";

/// Which cache store implementation backs the services.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheBackend {
    /// Networked Redis server (`GET` / `SETEX`).
    Redis,
    /// Local SQLite file with per-entry expiry.
    Sqlite,
    /// Process-local map; entries vanish on restart.
    Memory,
}

/// Application configuration with layered loading.
///
/// Loading precedence (highest wins):
/// 1. Environment variables (BOLOGNA_PRECIP_*)
/// 2. TOML config file (if BOLOGNA_PRECIP_CONFIG_FILE set)
/// 3. `REDIS_HOST` / `REDIS_PORT`
/// 4. Built-in defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Cache store implementation.
    ///
    /// Set via BOLOGNA_PRECIP_CACHE_BACKEND (`redis`, `sqlite` or `memory`).
    #[serde(default = "default_cache_backend")]
    pub cache_backend: CacheBackend,

    /// Redis host name.
    ///
    /// Set via BOLOGNA_PRECIP_REDIS_HOST or REDIS_HOST.
    #[serde(default = "default_redis_host")]
    pub redis_host: String,

    /// Redis TCP port.
    ///
    /// Set via BOLOGNA_PRECIP_REDIS_PORT or REDIS_PORT.
    #[serde(default = "default_redis_port")]
    pub redis_port: u16,

    /// Redis logical database index.
    #[serde(default)]
    pub redis_db: i64,

    /// Path to the SQLite cache database when `cache_backend = "sqlite"`.
    ///
    /// Set via BOLOGNA_PRECIP_DB_PATH environment variable.
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,

    /// Base URL of the Opendatasoft explore API.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Identifier of the upstream dataset.
    #[serde(default = "default_dataset_id")]
    pub dataset_id: String,

    /// User-Agent string for upstream requests.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Upstream HTTP request timeout in milliseconds.
    ///
    /// Set via BOLOGNA_PRECIP_TIMEOUT_MS environment variable.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Address the HTTP server binds to.
    ///
    /// Set via BOLOGNA_PRECIP_BIND_ADDR environment variable.
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
}

fn default_cache_backend() -> CacheBackend {
    CacheBackend::Redis
}

fn default_redis_host() -> String {
    "localhost".into()
}

fn default_redis_port() -> u16 {
    6379
}

fn default_db_path() -> PathBuf {
    PathBuf::from("./bologna-precip-cache.sqlite")
}

fn default_api_base_url() -> String {
    "https://opendata.comune.bologna.it/api/explore/v2.1".into()
}

fn default_dataset_id() -> String {
    "precipitazioni_bologna".into()
}

fn default_user_agent() -> String {
    "bologna-precip/0.1".into()
}

fn default_timeout_ms() -> u64 {
    20_000
}

fn default_bind_addr() -> String {
    "0.0.0.0:8000".into()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            cache_backend: default_cache_backend(),
            redis_host: default_redis_host(),
            redis_port: default_redis_port(),
            redis_db: 0,
            db_path: default_db_path(),
            api_base_url: default_api_base_url(),
            dataset_id: default_dataset_id(),
            user_agent: default_user_agent(),
            timeout_ms: default_timeout_ms(),
            bind_addr: default_bind_addr(),
        }
    }
}

impl AppConfig {
    /// Timeout as Duration for use with reqwest/tokio.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Connection URL for the Redis backend.
    pub fn redis_url(&self) -> String {
        format!("redis://{}:{}/{}", self.redis_host, self.redis_port, self.redis_db)
    }

    /// Load configuration from all sources with layered precedence.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Configuration file cannot be read
    /// - Environment variables cannot be parsed
    /// - Validation fails after loading
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()))
            .merge(Env::raw().only(&["redis_host", "redis_port"]));

        if let Ok(config_path) = std::env::var(CONFIG_FILE_ENV) {
            figment = figment.merge(Toml::file(&config_path));
        }

        figment = figment.merge(
            Env::prefixed(ENV_PREFIX)
                .map(|key| key.as_str().to_lowercase().into())
                .split("__"),
        );

        let config: Self = figment.extract().map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        config.validate()?;

        Ok(config)
    }
}
