//! Weekly precipitation service.

use std::sync::Arc;

use chrono::NaiveDate;

use super::cache_aside;
use crate::Error;
use crate::cache::{CacheStore, keys};
use crate::models::WeeklyPrecipitation;
use crate::upstream::PrecipitationFetcher;
use crate::week::WeekRange;

/// Serves precipitation records grouped by Monday-to-Sunday week.
#[derive(Clone)]
pub struct PrecipitationService {
    store: Arc<dyn CacheStore>,
    fetcher: Arc<dyn PrecipitationFetcher>,
}

impl PrecipitationService {
    pub fn new(store: Arc<dyn CacheStore>, fetcher: Arc<dyn PrecipitationFetcher>) -> Self {
        Self { store, fetcher }
    }

    /// Return the records of the week containing `date`.
    ///
    /// Any date of the same week resolves to the same cache entry, which is
    /// kept for 24 hours. Records are stored exactly as the upstream query
    /// returned them for the window.
    pub async fn get_weekly_precipitation(&self, date: NaiveDate) -> Result<WeeklyPrecipitation, Error> {
        let range = WeekRange::containing(date);
        let key = keys::weekly_precipitation(&range);

        cache_aside(self.store.as_ref(), &key, keys::WEEKLY_PRECIPITATION_TTL_SECS, || async move {
            let response = self.fetcher.fetch_precipitation(range.start(), range.end()).await?;
            tracing::debug!(
                week = %range,
                total_count = response.total_count,
                returned = response.results.len(),
                "fetched weekly precipitation"
            );
            Ok(WeeklyPrecipitation::new(range, response.results))
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MemoryStore;
    use crate::models::{PrecipitationRecord, PrecipitationResponse};
    use crate::service::fakes::{DownStore, FakeUpstream, ReadOnlyStore, Reply};

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn record(day: &str, mm: f64) -> PrecipitationRecord {
        PrecipitationRecord { date: date(day), avg_184_d: mm, stagione: "inverno".into() }
    }

    fn march_response() -> PrecipitationResponse {
        PrecipitationResponse { total_count: 2, results: vec![record("2023-03-13", 1.2), record("2023-03-14", 0.8)] }
    }

    fn upstream(reply: Reply<PrecipitationResponse>) -> Arc<FakeUpstream> {
        Arc::new(FakeUpstream::new(Reply::Status(500), reply))
    }

    #[tokio::test]
    async fn test_end_to_end_wednesday() {
        let store = Arc::new(MemoryStore::new());
        let upstream = upstream(Reply::Ok(march_response()));
        let service = PrecipitationService::new(store.clone(), upstream.clone());

        let result = service.get_weekly_precipitation(date("2023-03-15")).await.unwrap();

        assert_eq!(result.week_start, date("2023-03-13"));
        assert_eq!(result.week_end, date("2023-03-19"));
        assert_eq!(result.records, march_response().results);

        assert_eq!(*upstream.windows.lock().unwrap(), vec![(date("2023-03-13"), date("2023-03-19"))]);

        let entry = store.entry("precipitation_data_2023-03-13_2023-03-19").unwrap();
        assert_eq!(entry.ttl_seconds, 86_400);
        let cached: WeeklyPrecipitation = serde_json::from_str(&entry.value).unwrap();
        assert_eq!(cached, result);
    }

    #[tokio::test]
    async fn test_same_week_reuses_entry() {
        let store = Arc::new(MemoryStore::new());
        let upstream = upstream(Reply::Ok(march_response()));
        let service = PrecipitationService::new(store.clone(), upstream.clone());

        let monday = service.get_weekly_precipitation(date("2023-03-13")).await.unwrap();
        let sunday = service.get_weekly_precipitation(date("2023-03-19")).await.unwrap();

        assert_eq!(monday, sunday);
        assert_eq!(upstream.precipitation_calls(), 1);
        assert_eq!(store.write_count(), 1);
    }

    #[tokio::test]
    async fn test_next_week_is_a_separate_entry() {
        let store = Arc::new(MemoryStore::new());
        let upstream = upstream(Reply::Ok(march_response()));
        let service = PrecipitationService::new(store.clone(), upstream.clone());

        service.get_weekly_precipitation(date("2023-03-19")).await.unwrap();
        service.get_weekly_precipitation(date("2023-03-20")).await.unwrap();

        assert_eq!(upstream.precipitation_calls(), 2);
        assert!(store.entry("precipitation_data_2023-03-13_2023-03-19").is_some());
        assert!(store.entry("precipitation_data_2023-03-20_2023-03-26").is_some());
    }

    #[tokio::test]
    async fn test_hit_short_circuits_fetch() {
        let store = Arc::new(MemoryStore::new());
        let cached = WeeklyPrecipitation {
            week_start: date("2022-12-26"),
            week_end: date("2023-01-01"),
            records: vec![record("2022-12-31", 4.5)],
        };
        store
            .set_ex("precipitation_data_2022-12-26_2023-01-01", 86_400, &serde_json::to_string(&cached).unwrap())
            .await
            .unwrap();

        let upstream = upstream(Reply::Ok(march_response()));
        let service = PrecipitationService::new(store.clone(), upstream.clone());

        let result = service.get_weekly_precipitation(date("2023-01-01")).await.unwrap();
        assert_eq!(result, cached);
        assert_eq!(upstream.precipitation_calls(), 0);
    }

    #[tokio::test]
    async fn test_records_are_kept_verbatim() {
        let store = Arc::new(MemoryStore::new());
        let response = PrecipitationResponse {
            total_count: 3,
            results: vec![record("2023-03-13", 1.2), record("2023-03-12", 9.9), record("2023-03-14", 0.8)],
        };
        let service = PrecipitationService::new(store, upstream(Reply::Ok(response.clone())));

        let result = service.get_weekly_precipitation(date("2023-03-15")).await.unwrap();
        assert_eq!(result.records, response.results);
    }

    #[tokio::test]
    async fn test_empty_week() {
        let store = Arc::new(MemoryStore::new());
        let response = PrecipitationResponse { total_count: 0, results: vec![] };
        let service = PrecipitationService::new(store.clone(), upstream(Reply::Ok(response)));

        let result = service.get_weekly_precipitation(date("1999-06-02")).await.unwrap();
        assert!(result.records.is_empty());
        assert_eq!(store.write_count(), 1);
    }

    #[tokio::test]
    async fn test_upstream_error_writes_nothing() {
        let store = Arc::new(MemoryStore::new());
        let service = PrecipitationService::new(store.clone(), upstream(Reply::Status(404)));

        let result = service.get_weekly_precipitation(date("2023-03-15")).await;
        assert!(matches!(result, Err(Error::Upstream { status: 404 })));
        assert_eq!(store.write_count(), 0);
    }

    #[tokio::test]
    async fn test_validation_error_writes_nothing() {
        let store = Arc::new(MemoryStore::new());
        let service = PrecipitationService::new(store.clone(), upstream(Reply::Malformed));

        let result = service.get_weekly_precipitation(date("2023-03-15")).await;
        assert!(matches!(result, Err(Error::Validation(_))));
        assert_eq!(store.write_count(), 0);
    }

    #[tokio::test]
    async fn test_corrupt_cache_is_an_error() {
        let store = Arc::new(MemoryStore::new());
        store.set_ex("precipitation_data_2023-03-13_2023-03-19", 86_400, "not json").await.unwrap();
        let upstream = upstream(Reply::Ok(march_response()));
        let service = PrecipitationService::new(store, upstream.clone());

        let result = service.get_weekly_precipitation(date("2023-03-16")).await;
        assert!(
            matches!(result, Err(Error::CorruptCache { ref key, .. }) if key == "precipitation_data_2023-03-13_2023-03-19")
        );
        assert_eq!(upstream.precipitation_calls(), 0);
    }

    #[tokio::test]
    async fn test_store_unavailable_propagates() {
        let upstream = upstream(Reply::Ok(march_response()));
        let service = PrecipitationService::new(Arc::new(DownStore), upstream.clone());

        let result = service.get_weekly_precipitation(date("2023-03-15")).await;
        assert!(matches!(result, Err(Error::StoreUnavailable(_))));
        assert_eq!(upstream.precipitation_calls(), 0);
    }

    #[tokio::test]
    async fn test_failed_populate_is_an_error() {
        let upstream = upstream(Reply::Ok(march_response()));
        let service = PrecipitationService::new(Arc::new(ReadOnlyStore::default()), upstream.clone());

        let result = service.get_weekly_precipitation(date("2023-03-15")).await;
        assert!(matches!(result, Err(Error::StoreUnavailable(_))));
        assert_eq!(upstream.precipitation_calls(), 1);
    }

    #[tokio::test]
    async fn test_read_only_store_still_serves_hits() {
        let store = ReadOnlyStore::default();
        let cached = WeeklyPrecipitation::new(WeekRange::containing(date("2023-03-15")), march_response().results);
        store
            .inner
            .set_ex("precipitation_data_2023-03-13_2023-03-19", 86_400, &serde_json::to_string(&cached).unwrap())
            .await
            .unwrap();
        let upstream = upstream(Reply::Ok(march_response()));
        let service = PrecipitationService::new(Arc::new(store), upstream.clone());

        assert_eq!(service.get_weekly_precipitation(date("2023-03-17")).await.unwrap(), cached);
        assert_eq!(upstream.precipitation_calls(), 0);
    }
}
