//! Redis cache store.

use async_trait::async_trait;
use ::redis::AsyncCommands;
use ::redis::aio::MultiplexedConnection;

use super::store::CacheStore;
use crate::Error;

/// Redis-backed store using `GET` and `SETEX`.
///
/// Holds only the client; a multiplexed connection is opened per call so a
/// restarted Redis is picked up without restarting the service.
#[derive(Debug, Clone)]
pub struct RedisStore {
    client: ::redis::Client,
}

impl RedisStore {
    /// Create a store for `url` (e.g. `redis://localhost:6379/0`).
    ///
    /// Only the URL is validated here; no connection is made.
    pub fn open(url: &str) -> Result<Self, Error> {
        let client = ::redis::Client::open(url)?;
        Ok(Self { client })
    }

    async fn connection(&self) -> Result<MultiplexedConnection, Error> {
        self.client.get_multiplexed_async_connection().await.map_err(Error::from)
    }
}

#[async_trait]
impl CacheStore for RedisStore {
    async fn get(&self, key: &str) -> Result<Option<String>, Error> {
        let mut conn = self.connection().await?;
        let value: Option<String> = conn.get(key).await?;

        tracing::debug!(key, hit = value.is_some(), "redis GET");
        Ok(value)
    }

    async fn set_ex(&self, key: &str, ttl_seconds: u64, value: &str) -> Result<(), Error> {
        let mut conn = self.connection().await?;
        let _: () = conn.set_ex(key, value, ttl_seconds).await?;

        tracing::debug!(key, ttl_seconds, "redis SETEX");
        Ok(())
    }

    fn name(&self) -> &'static str {
        "redis"
    }
}
