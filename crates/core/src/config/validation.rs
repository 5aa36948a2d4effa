//! Configuration validation rules.
//!
//! This module provides validation logic for `AppConfig` values
//! after they have been loaded from environment, files, or defaults.

use std::net::SocketAddr;

use crate::config::{AppConfig, CacheBackend};
use thiserror::Error;

/// Configuration validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    LoadFailed(String),

    #[error("invalid configuration: {field} - {reason}")]
    Invalid { field: String, reason: String },

    #[error("missing required configuration: {field} ({hint})")]
    Missing { field: String, hint: String },
}

impl AppConfig {
    /// Validate configuration values after loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if:
    /// - `timeout_ms` is less than 100ms or exceeds 5 minutes
    /// - `user_agent` or `dataset_id` is empty
    /// - `api_base_url` is not an absolute http(s) URL
    /// - `bind_addr` is not a socket address
    /// - the Redis backend is selected with an empty host or port 0
    ///
    /// Returns `ConfigError::Missing` if the SQLite backend is selected
    /// without a database path.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timeout_ms < 100 {
            return Err(ConfigError::Invalid { field: "timeout_ms".into(), reason: "must be at least 100ms".into() });
        }
        if self.timeout_ms > 300_000 {
            return Err(ConfigError::Invalid {
                field: "timeout_ms".into(),
                reason: "must not exceed 5 minutes (300000ms)".into(),
            });
        }

        if self.user_agent.is_empty() {
            return Err(ConfigError::Invalid { field: "user_agent".into(), reason: "must not be empty".into() });
        }

        if self.dataset_id.trim().is_empty() {
            return Err(ConfigError::Invalid { field: "dataset_id".into(), reason: "must not be empty".into() });
        }

        match url::Url::parse(&self.api_base_url) {
            Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {}
            Ok(url) => {
                return Err(ConfigError::Invalid {
                    field: "api_base_url".into(),
                    reason: format!("unsupported scheme '{}'", url.scheme()),
                });
            }
            Err(e) => {
                return Err(ConfigError::Invalid { field: "api_base_url".into(), reason: e.to_string() });
            }
        }

        if self.bind_addr.parse::<SocketAddr>().is_err() {
            return Err(ConfigError::Invalid {
                field: "bind_addr".into(),
                reason: format!("'{}' is not a socket address", self.bind_addr),
            });
        }

        match self.cache_backend {
            CacheBackend::Redis => {
                if self.redis_host.is_empty() {
                    return Err(ConfigError::Invalid { field: "redis_host".into(), reason: "must not be empty".into() });
                }
                if self.redis_port == 0 {
                    return Err(ConfigError::Invalid { field: "redis_port".into(), reason: "must not be 0".into() });
                }
                if self.redis_db < 0 {
                    return Err(ConfigError::Invalid { field: "redis_db".into(), reason: "must not be negative".into() });
                }
            }
            CacheBackend::Sqlite => {
                if self.db_path.as_os_str().is_empty() {
                    return Err(ConfigError::Missing {
                        field: "db_path".into(),
                        hint: "Set BOLOGNA_PRECIP_DB_PATH when using the sqlite backend".into(),
                    });
                }
            }
            CacheBackend::Memory => {
                tracing::warn!("memory cache backend selected; cached entries are lost on restart");
            }
        }

        Ok(())
    }
}
