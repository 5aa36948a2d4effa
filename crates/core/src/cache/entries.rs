//! Cache entry operations for the SQLite store.
//!
//! Entries carry an absolute expiry in unix milliseconds; reads ignore
//! anything at or past it and `purge_expired` reclaims the rows.

use async_trait::async_trait;
use chrono::Utc;
use tokio_rusqlite::params;
use tokio_rusqlite::rusqlite;

use super::connection::SqliteStore;
use super::store::CacheStore;
use crate::Error;

fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}

impl SqliteStore {
    /// Get a live entry by key.
    ///
    /// Returns None if the key doesn't exist or has expired.
    pub async fn get_entry(&self, key: &str) -> Result<Option<String>, Error> {
        let key = key.to_string();
        let now = now_ms();
        self.conn
            .call(move |conn| -> Result<Option<String>, Error> {
                let mut stmt =
                    conn.prepare("SELECT value FROM cache_entries WHERE key = ?1 AND expires_at_ms > ?2")?;

                match stmt.query_row(params![key, now], |row| row.get(0)) {
                    Ok(value) => Ok(Some(value)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(e.into()),
                }
            })
            .await
            .map_err(Error::from)
    }

    /// Insert or replace an entry expiring `ttl_seconds` from now.
    ///
    /// Uses UPSERT semantics: inserts if the key doesn't exist, updates all fields if it does.
    pub async fn put_entry(&self, key: &str, ttl_seconds: u64, value: &str) -> Result<(), Error> {
        let key = key.to_string();
        let value = value.to_string();
        let ttl = i64::try_from(ttl_seconds).unwrap_or(i64::MAX);
        let stored_at = Utc::now().to_rfc3339();
        let expires_at_ms = now_ms().saturating_add(ttl.saturating_mul(1000));

        self.conn
            .call(move |conn| -> Result<(), Error> {
                conn.execute(
                    "INSERT INTO cache_entries (key, value, ttl_seconds, stored_at, expires_at_ms)
                    VALUES (?1, ?2, ?3, ?4, ?5)
                    ON CONFLICT(key) DO UPDATE SET
                        value = excluded.value,
                        ttl_seconds = excluded.ttl_seconds,
                        stored_at = excluded.stored_at,
                        expires_at_ms = excluded.expires_at_ms",
                    params![key, value, ttl, stored_at, expires_at_ms],
                )?;
                Ok(())
            })
            .await
            .map_err(Error::from)
    }

    /// Delete expired entries.
    ///
    /// Returns the number of deleted entries.
    pub(crate) async fn delete_expired(&self) -> Result<u64, Error> {
        let now = now_ms();
        self.conn
            .call(move |conn| -> Result<u64, Error> {
                let count = conn.execute("DELETE FROM cache_entries WHERE expires_at_ms <= ?1", params![now])?;
                Ok(count as u64)
            })
            .await
            .map_err(Error::from)
    }
}

#[async_trait]
impl CacheStore for SqliteStore {
    async fn get(&self, key: &str) -> Result<Option<String>, Error> {
        let value = self.get_entry(key).await?;
        tracing::debug!(key, hit = value.is_some(), "sqlite store get");
        Ok(value)
    }

    async fn set_ex(&self, key: &str, ttl_seconds: u64, value: &str) -> Result<(), Error> {
        self.put_entry(key, ttl_seconds, value).await?;
        tracing::debug!(key, ttl_seconds, "sqlite store set");
        Ok(())
    }

    async fn purge_expired(&self) -> Result<u64, Error> {
        let deleted = self.delete_expired().await?;
        tracing::debug!(deleted, "sqlite store purged expired entries");
        Ok(deleted)
    }

    fn name(&self) -> &'static str {
        "sqlite"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn row_count(store: &SqliteStore) -> i64 {
        store
            .conn
            .call(|conn| conn.query_row("SELECT COUNT(*) FROM cache_entries", [], |row| row.get::<_, i64>(0)))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_put_and_get() {
        let store = SqliteStore::open_in_memory().await.unwrap();
        let value = r#"{"week_start":"2023-03-13","week_end":"2023-03-19","records":[]}"#;

        store.set_ex("precipitation_data_2023-03-13_2023-03-19", 86_400, value).await.unwrap();

        let retrieved = store.get("precipitation_data_2023-03-13_2023-03-19").await.unwrap().unwrap();
        assert_eq!(retrieved, value);
    }

    #[tokio::test]
    async fn test_get_missing() {
        let store = SqliteStore::open_in_memory().await.unwrap();
        assert!(store.get("nonexistent").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_upsert() {
        let store = SqliteStore::open_in_memory().await.unwrap();
        store.set_ex("k", 60, r#"{"old":1}"#).await.unwrap();
        store.set_ex("k", 3600, r#"{"new":2}"#).await.unwrap();

        assert_eq!(store.get("k").await.unwrap().unwrap(), r#"{"new":2}"#);
        assert_eq!(row_count(&store).await, 1);
    }

    #[tokio::test]
    async fn test_expired_entry_is_absent() {
        let store = SqliteStore::open_in_memory().await.unwrap();
        store.set_ex("expiring", 1, "{}").await.unwrap();
        assert!(store.get("expiring").await.unwrap().is_some());

        tokio::time::sleep(tokio::time::Duration::from_millis(1200)).await;

        assert!(store.get("expiring").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_purge_expired() {
        let store = SqliteStore::open_in_memory().await.unwrap();
        store.set_ex("expiring", 1, "{}").await.unwrap();
        store.set_ex("fresh", 3600, "{}").await.unwrap();

        tokio::time::sleep(tokio::time::Duration::from_millis(1200)).await;

        let deleted = store.purge_expired().await.unwrap();
        assert_eq!(deleted, 1);
        assert_eq!(row_count(&store).await, 1);
        assert!(store.get("fresh").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_huge_ttl_does_not_overflow() {
        let store = SqliteStore::open_in_memory().await.unwrap();
        store.set_ex("forever", u64::MAX, "{}").await.unwrap();
        assert!(store.get("forever").await.unwrap().is_some());
    }
}
