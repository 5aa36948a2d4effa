//! Structured errors for the HTTP surface.
//!
//! Caller mistakes map to 400, every service failure maps to 500. Bodies use
//! the `{"detail": "..."}` shape the web front-end already parses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use bologna_precip_core::Error;
use serde::Serialize;

/// Errors returned by route handlers.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The `date` query parameter is malformed.
    #[error("Invalid date format. Use YYYY-MM-DD.")]
    InvalidDate,

    /// Store, upstream or cache failure.
    #[error(transparent)]
    Service(Error),
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        if err.is_client_error() { ApiError::InvalidDate } else { ApiError::Service(err) }
    }
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidDate => StatusCode::BAD_REQUEST,
            ApiError::Service(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    detail: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Service(err) => tracing::error!(error = %err, code = err.code(), "request failed"),
            ApiError::InvalidDate => tracing::warn!("rejected malformed date"),
        }

        (self.status_code(), Json(ErrorBody { detail: self.to_string() })).into_response()
    }
}
