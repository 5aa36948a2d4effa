//! Key-value cache store adapter.
//!
//! Services only ever talk to the [`CacheStore`] trait: `get` a JSON string
//! or `set_ex` one with a TTL. Expiry is entirely the store's business.
//! Three backends are provided:
//!
//! - [`RedisStore`]: networked Redis using `GET` / `SETEX`
//! - [`SqliteStore`]: local SQLite file via tokio-rusqlite, WAL mode, migrations
//! - [`MemoryStore`]: process-local map, used for tests and single-node runs

pub mod connection;
pub mod entries;
pub mod keys;
pub mod memory;
pub mod migrations;
pub mod redis;
pub mod store;

use std::sync::Arc;

pub use crate::Error;
use crate::config::{AppConfig, CacheBackend};

pub use connection::SqliteStore;
pub use memory::{MemoryEntry, MemoryStore};
pub use self::redis::RedisStore;
pub use store::CacheStore;

/// Build the store selected by `config.cache_backend`.
///
/// The Redis backend connects lazily, so an unreachable server surfaces as
/// `StoreUnavailable` on the first request rather than here.
pub async fn open_store(config: &AppConfig) -> Result<Arc<dyn CacheStore>, Error> {
    let store: Arc<dyn CacheStore> = match config.cache_backend {
        CacheBackend::Redis => Arc::new(RedisStore::open(&config.redis_url())?),
        CacheBackend::Sqlite => Arc::new(SqliteStore::open(&config.db_path).await?),
        CacheBackend::Memory => Arc::new(MemoryStore::new()),
    };

    tracing::info!(backend = store.name(), "cache store ready");
    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_open_memory_store() {
        let config = AppConfig { cache_backend: CacheBackend::Memory, ..Default::default() };
        let store = open_store(&config).await.unwrap();
        assert_eq!(store.name(), "memory");
        assert!(store.get("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_open_redis_store_is_lazy() {
        let config = AppConfig { redis_host: "127.0.0.1".into(), redis_port: 1, ..Default::default() };
        let store = open_store(&config).await.unwrap();
        assert_eq!(store.name(), "redis");
    }
}
