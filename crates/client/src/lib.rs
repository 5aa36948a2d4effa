//! Client code for bologna-precip.
//!
//! This crate provides the HTTP client for the Bologna open-data explore API,
//! implementing the fetcher traits that the core services depend on.

pub mod opendata;

pub use opendata::{DatasetQuery, OpenDataClient, OpenDataConfig, RecordsQuery};
