//! Cache store trait definition.

use async_trait::async_trait;

use crate::Error;

/// String-keyed store with per-entry expiry.
///
/// Implementations perform no retries; any connection failure is returned as
/// [`Error::StoreUnavailable`].
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Return the value under `key` if present and unexpired.
    ///
    /// A missing key is `Ok(None)`, never an error.
    async fn get(&self, key: &str) -> Result<Option<String>, Error>;

    /// Store `value` under `key`, expiring `ttl_seconds` from now.
    ///
    /// Overwrites any previous value and resets its expiry.
    async fn set_ex(&self, key: &str, ttl_seconds: u64, value: &str) -> Result<(), Error>;

    /// Drop entries whose expiry has passed and return how many were removed.
    ///
    /// Stores that expire keys themselves keep the default no-op.
    async fn purge_expired(&self) -> Result<u64, Error> {
        Ok(0)
    }

    /// Short backend name for logs.
    fn name(&self) -> &'static str;
}
