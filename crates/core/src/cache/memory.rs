//! In-memory cache store.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use dashmap::DashMap;

use super::store::CacheStore;
use crate::Error;

/// A stored value together with the TTL it was written with.
#[derive(Debug, Clone)]
pub struct MemoryEntry {
    pub value: String,
    pub ttl_seconds: u64,
    expires_at: Option<Instant>,
}

impl MemoryEntry {
    fn is_live(&self, now: Instant) -> bool {
        self.expires_at.is_none_or(|at| at > now)
    }
}

/// Process-local cache store.
///
/// Expired entries are dropped lazily on read. Every `set_ex` is counted,
/// which lets callers assert that nothing was written.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: DashMap<String, MemoryEntry>,
    writes: AtomicU64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The live entry under `key`, including the TTL it was stored with.
    pub fn entry(&self, key: &str) -> Option<MemoryEntry> {
        let now = Instant::now();
        self.entries.get(key).filter(|e| e.is_live(now)).map(|e| e.value().clone())
    }

    /// Number of `set_ex` calls since creation.
    pub fn write_count(&self) -> u64 {
        self.writes.load(Ordering::Relaxed)
    }

    /// Drop every expired entry, returning how many were removed.
    pub fn sweep(&self) -> usize {
        let now = Instant::now();
        let before = self.entries.len();
        self.entries.retain(|_, e| e.is_live(now));
        before.saturating_sub(self.entries.len())
    }

    /// Number of entries held, expired or not.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl CacheStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, Error> {
        let now = Instant::now();
        if let Some(entry) = self.entries.get(key)
            && entry.is_live(now)
        {
            tracing::debug!(key, "memory store hit");
            return Ok(Some(entry.value.clone()));
        }

        self.entries.remove_if(key, |_, e| !e.is_live(now));
        tracing::debug!(key, "memory store miss");
        Ok(None)
    }

    async fn set_ex(&self, key: &str, ttl_seconds: u64, value: &str) -> Result<(), Error> {
        let swept = self.sweep();
        if swept > 0 {
            tracing::debug!(swept, "memory store dropped expired entries");
        }

        let entry = MemoryEntry {
            value: value.to_string(),
            ttl_seconds,
            expires_at: Instant::now().checked_add(Duration::from_secs(ttl_seconds)),
        };
        self.entries.insert(key.to_string(), entry);
        self.writes.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(key, ttl_seconds, "memory store set");
        Ok(())
    }

    async fn purge_expired(&self) -> Result<u64, Error> {
        Ok(self.sweep() as u64)
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
