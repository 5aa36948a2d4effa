//! Cache-aside services.
//!
//! Each service owns the policy for one resource: which key it lives under,
//! how long it stays cached, and which fetcher produces it on a miss. The
//! sequence is always the same:
//!
//! 1. `store.get(key)`; a hit is deserialized and returned
//! 2. on a miss, fetch from upstream
//! 3. serialize and `store.set_ex(key, ttl, json)`
//! 4. return the fetched value
//!
//! Nothing is retried and nothing is written when a step fails. Concurrent
//! misses on the same key each fetch and write; the last write wins.

pub mod dataset;
pub mod precipitation;

use std::future::Future;

use serde::{Serialize, de::DeserializeOwned};

use crate::Error;
use crate::cache::CacheStore;

pub use dataset::DatasetService;
pub use precipitation::PrecipitationService;

/// Read `key` from `store`, falling back to `fetch` and populating the store.
///
/// A cached value that fails to deserialize is reported as
/// [`Error::CorruptCache`] and is not refetched.
pub(crate) async fn cache_aside<T, F, Fut>(store: &dyn CacheStore, key: &str, ttl_seconds: u64, fetch: F) -> Result<T, Error>
where
    T: Serialize + DeserializeOwned,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, Error>>,
{
    if let Some(cached) = store.get(key).await? {
        let value = serde_json::from_str(&cached)
            .map_err(|e| Error::CorruptCache { key: key.to_string(), reason: e.to_string() })?;
        tracing::debug!(key, "cache hit");
        return Ok(value);
    }

    tracing::debug!(key, "cache miss");
    let value = fetch().await?;

    let serialized = serde_json::to_string(&value).map_err(|e| Error::Serialization(e.to_string()))?;
    store.set_ex(key, ttl_seconds, &serialized).await?;
    tracing::debug!(key, ttl_seconds, bytes = serialized.len(), "cache populated");

    Ok(value)
}
