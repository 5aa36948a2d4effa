//! Bologna open-data explore API client.
//!
//! ### Endpoints
//!
//! - **Dataset**: `GET {base_url}/catalog/datasets/{dataset_id}`
//! - **Records**: `GET {base_url}/catalog/datasets/{dataset_id}/records`
//!   filtered to an inclusive date window, at most 100 records.
//!
//! ### Error mapping
//!
//! - non-2xx status: `Error::Upstream { status }`
//! - connect failure, timeout or truncated body: `Error::UpstreamUnreachable`
//! - 2xx body that does not match the typed record: `Error::Validation`
//!
//! No retries and no rate limiting; the cache in front absorbs repeated reads.

pub mod request;

pub use request::{DatasetQuery, RecordsQuery};

use std::time::{Duration, Instant};

use async_trait::async_trait;
use bologna_precip_core::models::{Dataset, PrecipitationResponse};
use bologna_precip_core::{AppConfig, DatasetFetcher, Error, PrecipitationFetcher};
use chrono::NaiveDate;
use reqwest::header;
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

/// Default base URL of the explore API.
const DEFAULT_BASE_URL: &str = "https://opendata.comune.bologna.it/api/explore/v2.1";

/// Default dataset identifier.
const DEFAULT_DATASET_ID: &str = "precipitazioni_bologna";

/// Default request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);

/// Default user agent.
const DEFAULT_USER_AGENT: &str = "bologna-precip/0.1";

/// Open-data client configuration.
#[derive(Debug, Clone)]
pub struct OpenDataConfig {
    /// Base URL (default: https://opendata.comune.bologna.it/api/explore/v2.1).
    pub base_url: String,
    /// Dataset identifier (default: precipitazioni_bologna).
    pub dataset_id: String,
    /// Request timeout (default: 20s).
    pub timeout: Duration,
    /// User-agent string (default: bologna-precip/0.x).
    pub user_agent: String,
}

impl Default for OpenDataConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            dataset_id: DEFAULT_DATASET_ID.to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl OpenDataConfig {
    /// Build from the loaded application configuration.
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            base_url: config.api_base_url.clone(),
            dataset_id: config.dataset_id.clone(),
            timeout: config.timeout(),
            user_agent: config.user_agent.clone(),
        }
    }
}

/// Typed client for the dataset descriptor and precipitation records.
#[derive(Debug, Clone)]
pub struct OpenDataClient {
    http: reqwest::Client,
    base_url: Url,
    config: OpenDataConfig,
}

impl OpenDataClient {
    /// Create a new client with the given configuration.
    ///
    /// # Errors
    ///
    /// `Error::Validation` if the base URL is not an absolute http(s) URL,
    /// `Error::UpstreamUnreachable` if the HTTP client cannot be built.
    pub fn new(config: OpenDataConfig) -> Result<Self, Error> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| Error::Validation(format!("invalid base url {}: {e}", config.base_url)))?;
        if base_url.cannot_be_a_base() {
            return Err(Error::Validation(format!("invalid base url {}", config.base_url)));
        }

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| Error::UpstreamUnreachable(e.to_string()))?;

        Ok(Self { http, base_url, config })
    }

    /// Create a client from the loaded application configuration.
    pub fn from_app_config(config: &AppConfig) -> Result<Self, Error> {
        Self::new(OpenDataConfig::from_app_config(config))
    }

    /// URL of `catalog/datasets/{dataset_id}` plus any trailing segments.
    fn dataset_url(&self, trailing: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(["catalog", "datasets", self.config.dataset_id.as_str()])
                .extend(trailing);
        }
        url
    }

    async fn get_json<T, Q>(&self, url: Url, query: &Q) -> Result<T, Error>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let start = Instant::now();
        tracing::debug!(url = %url, "requesting open-data endpoint");

        let response = self
            .http
            .get(url.clone())
            .header(header::ACCEPT, "application/json")
            .query(query)
            .send()
            .await
            .map_err(|e| Error::UpstreamUnreachable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!(url = %url, status = status.as_u16(), "open-data request failed");
            return Err(Error::Upstream { status: status.as_u16() });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| Error::UpstreamUnreachable(e.to_string()))?;
        let body = serde_json::from_slice(&bytes).map_err(|e| Error::Validation(e.to_string()))?;

        tracing::debug!(url = %url, bytes = bytes.len(), elapsed = ?start.elapsed(), "open-data request completed");
        Ok(body)
    }
}

#[async_trait]
impl DatasetFetcher for OpenDataClient {
    async fn fetch_dataset(&self) -> Result<Dataset, Error> {
        self.get_json(self.dataset_url(&[]), &DatasetQuery::default()).await
    }
}

#[async_trait]
impl PrecipitationFetcher for OpenDataClient {
    async fn fetch_precipitation(&self, start: NaiveDate, end: NaiveDate) -> Result<PrecipitationResponse, Error> {
        let response: PrecipitationResponse = self
            .get_json(self.dataset_url(&["records"]), &RecordsQuery::window(start, end))
            .await?;
        tracing::debug!(%start, %end, total_count = response.total_count, "fetched precipitation records");
        Ok(response)
    }
}
