//! Typed fetcher seams between the services and the upstream API.
//!
//! The HTTP implementation lives in the client crate; services only see
//! these traits, which keeps them testable without a network.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::Error;
use crate::models::{Dataset, PrecipitationResponse};

/// Fetches the dataset descriptor.
#[async_trait]
pub trait DatasetFetcher: Send + Sync {
    /// # Errors
    ///
    /// - `Error::Upstream` for a non-2xx status
    /// - `Error::UpstreamUnreachable` when no response was received
    /// - `Error::Validation` when the body does not match [`Dataset`]
    async fn fetch_dataset(&self) -> Result<Dataset, Error>;
}

/// Fetches precipitation records for an inclusive date window.
#[async_trait]
pub trait PrecipitationFetcher: Send + Sync {
    /// # Errors
    ///
    /// Same taxonomy as [`DatasetFetcher::fetch_dataset`].
    async fn fetch_precipitation(&self, start: NaiveDate, end: NaiveDate) -> Result<PrecipitationResponse, Error>;
}
