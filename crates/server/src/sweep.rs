//! Background removal of expired cache entries.

use std::sync::Arc;
use std::time::Duration;

use bologna_precip_core::CacheStore;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// How often expired entries are purged.
pub const SWEEP_INTERVAL: Duration = Duration::from_secs(15 * 60);

/// Purge `store` every `every` until the runtime shuts down.
///
/// A failed purge is logged and retried on the next tick.
pub fn spawn_expiry_sweep(store: Arc<dyn CacheStore>, every: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            match store.purge_expired().await {
                Ok(0) => {}
                Ok(deleted) => tracing::info!(backend = store.name(), deleted, "purged expired cache entries"),
                Err(e) => tracing::warn!(backend = store.name(), error = %e, "cache purge failed"),
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use bologna_precip_core::MemoryStore;

    #[tokio::test]
    async fn test_sweep_removes_expired_entries() {
        let store = Arc::new(MemoryStore::new());
        store.set_ex("precipitation_data_2023-03-13_2023-03-19", 0, "{}").await.unwrap();
        assert_eq!(store.len(), 1);

        let handle = spawn_expiry_sweep(store.clone(), Duration::from_millis(10));
        tokio::time::sleep(Duration::from_millis(100)).await;
        handle.abort();

        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_sweep_keeps_live_entries() {
        let store = Arc::new(MemoryStore::new());
        store.set_ex("opendata_bologna_dataset", 3600, "{}").await.unwrap();

        let handle = spawn_expiry_sweep(store.clone(), Duration::from_millis(10));
        tokio::time::sleep(Duration::from_millis(50)).await;
        handle.abort();

        assert_eq!(store.len(), 1);
    }
}
