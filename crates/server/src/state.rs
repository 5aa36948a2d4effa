//! Shared handler state.

use std::sync::Arc;

use bologna_precip_core::{CacheStore, DatasetFetcher, DatasetService, PrecipitationFetcher, PrecipitationService};

/// Services handed to every request.
#[derive(Clone)]
pub struct AppState {
    pub dataset: DatasetService,
    pub precipitation: PrecipitationService,
}

impl AppState {
    pub fn new(
        store: Arc<dyn CacheStore>, datasets: Arc<dyn DatasetFetcher>, precipitation: Arc<dyn PrecipitationFetcher>,
    ) -> Self {
        Self {
            dataset: DatasetService::new(store.clone(), datasets),
            precipitation: PrecipitationService::new(store, precipitation),
        }
    }
}
