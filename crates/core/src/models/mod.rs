//! Typed records served by the cache.

pub mod dataset;
pub mod precipitation;

pub use dataset::{Annotations, Dataset, Dcat, DcatApIt, DefaultMetas, Field, Metas, Semantic};
pub use precipitation::{PrecipitationRecord, PrecipitationResponse, WeeklyPrecipitation};
