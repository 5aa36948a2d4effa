//! Dataset descriptor service.

use std::sync::Arc;

use super::cache_aside;
use crate::Error;
use crate::cache::{CacheStore, keys};
use crate::models::Dataset;
use crate::upstream::DatasetFetcher;

/// Serves the dataset descriptor through the cache.
#[derive(Clone)]
pub struct DatasetService {
    store: Arc<dyn CacheStore>,
    fetcher: Arc<dyn DatasetFetcher>,
}

impl DatasetService {
    pub fn new(store: Arc<dyn CacheStore>, fetcher: Arc<dyn DatasetFetcher>) -> Self {
        Self { store, fetcher }
    }

    /// Return the cached descriptor, fetching and caching it for an hour on a miss.
    pub async fn get_dataset(&self) -> Result<Dataset, Error> {
        cache_aside(self.store.as_ref(), keys::DATASET_KEY, keys::DATASET_TTL_SECS, || self.fetcher.fetch_dataset())
            .await
    }
}
