//! Precipitation records and the weekly result built from them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::week::WeekRange;

/// One daily observation from the `precipitazioni_bologna` dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrecipitationRecord {
    pub date: NaiveDate,
    /// Average precipitation in millimetres.
    pub avg_184_d: f64,
    /// Season label as published upstream (`inverno`, `primavera`, ...).
    pub stagione: String,
}

/// Records endpoint body, as returned by the upstream API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrecipitationResponse {
    pub total_count: i64,
    pub results: Vec<PrecipitationRecord>,
}

/// Precipitation records for one Monday-to-Sunday window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyPrecipitation {
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
    pub records: Vec<PrecipitationRecord>,
}

impl WeeklyPrecipitation {
    /// Combine a week window with the records fetched for it.
    ///
    /// Records are kept as given; the upstream query already bounds them.
    pub fn new(range: WeekRange, records: Vec<PrecipitationRecord>) -> Self {
        Self { week_start: range.start(), week_end: range.end(), records }
    }
}
