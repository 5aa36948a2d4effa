//! Unified error types for bologna-precip.
//!
//! Every variant renders with a stable `CODE: detail` prefix so that log lines
//! and HTTP error bodies can be matched on without parsing free text.

use tokio_rusqlite::rusqlite;

/// Unified error types for the cache service.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The cache store could not be reached or rejected the command.
    #[error("STORE_UNAVAILABLE: {0}")]
    StoreUnavailable(String),

    /// Upstream API answered with a non-2xx status.
    #[error("UPSTREAM_ERROR: status {status}")]
    Upstream { status: u16 },

    /// Upstream API could not be reached (connect failure, timeout, truncated body).
    #[error("UPSTREAM_ERROR: {0}")]
    UpstreamUnreachable(String),

    /// A 2xx upstream body did not match the expected record shape.
    #[error("VALIDATION_ERROR: {0}")]
    Validation(String),

    /// A cached value could not be deserialized into the expected record.
    #[error("CORRUPT_CACHE: {key}: {reason}")]
    CorruptCache { key: String, reason: String },

    /// A record could not be serialized for storage.
    #[error("SERIALIZATION_ERROR: {0}")]
    Serialization(String),

    /// Caller supplied a date that is not `YYYY-MM-DD`.
    #[error("INVALID_DATE: {0}")]
    InvalidDate(String),

    /// SQLite schema migration failed to apply.
    #[error("STORE_UNAVAILABLE: migration failed: {0}")]
    MigrationFailed(String),
}

impl Error {
    /// Stable machine-readable code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            Error::StoreUnavailable(_) | Error::MigrationFailed(_) => "STORE_UNAVAILABLE",
            Error::Upstream { .. } | Error::UpstreamUnreachable(_) => "UPSTREAM_ERROR",
            Error::Validation(_) => "VALIDATION_ERROR",
            Error::CorruptCache { .. } => "CORRUPT_CACHE",
            Error::Serialization(_) => "SERIALIZATION_ERROR",
            Error::InvalidDate(_) => "INVALID_DATE",
        }
    }

    /// Whether the failure was caused by the caller's input rather than by the service.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Error::InvalidDate(_))
    }
}

impl From<redis::RedisError> for Error {
    fn from(err: redis::RedisError) -> Self {
        Error::StoreUnavailable(err.to_string())
    }
}

impl From<tokio_rusqlite::Error<Error>> for Error {
    fn from(err: tokio_rusqlite::Error<Error>) -> Self {
        match err {
            tokio_rusqlite::Error::Error(e) => e,
            other => Error::StoreUnavailable(other.to_string()),
        }
    }
}

impl From<tokio_rusqlite::Error<rusqlite::Error>> for Error {
    fn from(err: tokio_rusqlite::Error<rusqlite::Error>) -> Self {
        Error::StoreUnavailable(err.to_string())
    }
}

impl From<rusqlite::Error> for Error {
    fn from(err: rusqlite::Error) -> Self {
        Error::StoreUnavailable(err.to_string())
    }
}
