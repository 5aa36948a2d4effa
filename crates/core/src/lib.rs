//! Core types and shared functionality for bologna-precip.
//!
//! This crate provides:
//! - Typed records for the dataset descriptor and precipitation data
//! - Monday-to-Sunday week window calculation
//! - Cache store adapter with Redis, SQLite and in-memory backends
//! - Cache-aside services that compose a store with an upstream fetcher
//! - Unified error types
//! - Configuration structures

pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod service;
pub mod upstream;
pub mod week;

pub use cache::{CacheStore, MemoryStore, RedisStore, SqliteStore, open_store};
pub use config::{AppConfig, CacheBackend, ConfigError};
pub use error::Error;
pub use models::{Dataset, PrecipitationRecord, PrecipitationResponse, WeeklyPrecipitation};
pub use service::{DatasetService, PrecipitationService};
pub use upstream::{DatasetFetcher, PrecipitationFetcher};
pub use week::{WeekRange, week_range};
