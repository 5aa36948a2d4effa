//! Cache keys and TTL policy.
//!
//! Keys carry no namespace prefix: they are shared with any other reader of
//! the same store and must stay byte-compatible across deployments.

use crate::week::WeekRange;

/// Key of the single cached dataset descriptor.
pub const DATASET_KEY: &str = "opendata_bologna_dataset";

/// Prefix of the weekly precipitation keys.
pub const WEEKLY_PRECIPITATION_PREFIX: &str = "precipitation_data";

/// Dataset descriptors change rarely.
pub const DATASET_TTL_SECS: u64 = 3600;

/// Only the still-accumulating current week can go stale within a day.
pub const WEEKLY_PRECIPITATION_TTL_SECS: u64 = 86_400;

/// Key for the precipitation records of one week window.
///
/// Every date in the same Monday-to-Sunday span yields the same key.
pub fn weekly_precipitation(range: &WeekRange) -> String {
    format!("{}_{}_{}", WEEKLY_PRECIPITATION_PREFIX, range.start(), range.end())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_weekly_key_format() {
        let key = weekly_precipitation(&WeekRange::containing(date("2023-03-15")));
        assert_eq!(key, "precipitation_data_2023-03-13_2023-03-19");
    }

    #[test]
    fn test_weekly_key_stable_within_window() {
        let expected = weekly_precipitation(&WeekRange::containing(date("2023-01-02")));
        let mut day = date("2023-01-02");
        for _ in 0..7 {
            assert_eq!(weekly_precipitation(&WeekRange::containing(day)), expected);
            day = day.succ_opt().unwrap();
        }
        assert_ne!(weekly_precipitation(&WeekRange::containing(day)), expected);
    }

    #[test]
    fn test_ttl_policy() {
        assert_eq!(DATASET_TTL_SECS, 3600);
        assert_eq!(WEEKLY_PRECIPITATION_TTL_SECS, 24 * 3600);
    }
}
