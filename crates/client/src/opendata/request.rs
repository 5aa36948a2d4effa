//! Query parameters for the explore API endpoints.

use chrono::NaiveDate;
use serde::Serialize;

/// Maximum number of records requested per window.
pub const RECORDS_LIMIT: u32 = 100;

/// Query for `GET /catalog/datasets/{dataset_id}`.
#[derive(Debug, Clone, Serialize)]
pub struct DatasetQuery {
    pub timezone: &'static str,
    pub include_links: bool,
    pub include_app_metas: bool,
}

impl Default for DatasetQuery {
    fn default() -> Self {
        Self { timezone: "UTC", include_links: false, include_app_metas: false }
    }
}

/// Query for `GET /catalog/datasets/{dataset_id}/records`.
///
/// The window is inclusive on both ends and expressed as an ODSQL `where`
/// clause over the `date` field.
#[derive(Debug, Clone, Serialize)]
pub struct RecordsQuery {
    #[serde(rename = "where")]
    pub where_clause: String,
    pub limit: u32,
    pub timezone: &'static str,
    pub include_links: bool,
    pub include_app_metas: bool,
}

impl RecordsQuery {
    pub fn window(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            where_clause: format!("date >= '{start}' AND date <= '{end}'"),
            limit: RECORDS_LIMIT,
            timezone: "UTC",
            include_links: false,
            include_app_metas: false,
        }
    }
}
