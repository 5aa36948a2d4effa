//! HTTP routes.

use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use bologna_precip_core::week::parse_date;
use bologna_precip_core::{Dataset, WeeklyPrecipitation};
use serde::Deserialize;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::error::ApiError;
use crate::state::AppState;

/// Query string of `GET /precipitation`.
#[derive(Debug, Deserialize)]
pub struct PrecipitationParams {
    /// Any day of the requested week, `YYYY-MM-DD`.
    pub date: String,
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/dataset", get(get_dataset))
        .route("/precipitation", get(get_precipitation))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn get_dataset(State(state): State<AppState>) -> Result<Json<Dataset>, ApiError> {
    Ok(Json(state.dataset.get_dataset().await?))
}

async fn get_precipitation(
    State(state): State<AppState>, Query(params): Query<PrecipitationParams>,
) -> Result<Json<WeeklyPrecipitation>, ApiError> {
    let date = parse_date(&params.date)?;
    Ok(Json(state.precipitation.get_weekly_precipitation(date).await?))
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}
