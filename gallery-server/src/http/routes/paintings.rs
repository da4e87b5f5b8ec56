//! Painting endpoints

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use gallery_core::Painting;
use serde::Serialize;

use crate::http::error::ApiError;
use crate::http::extractors::{PaintingBody, Year};
use crate::http::server::AppState;

/// Oldest-year response; `null` when there are no paintings
#[derive(Debug, Serialize)]
pub struct OldestYearResponse {
    pub oldest_year: Option<i32>,
}

/// GET /painting - every painting
async fn list_paintings(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Painting>>, ApiError> {
    let paintings = state.service.get_all_paintings().await?;
    Ok(Json(paintings))
}

/// POST /painting - store a painting and echo it back
async fn create_painting(
    State(state): State<Arc<AppState>>,
    PaintingBody(painting): PaintingBody,
) -> Result<Json<Painting>, ApiError> {
    let painting = state.service.insert_painting(painting).await?;
    Ok(Json(painting))
}

/// GET /painting/year/{year} - paintings made in `year`
async fn list_paintings_in_year(
    State(state): State<Arc<AppState>>,
    Year(year): Year,
) -> Result<Json<Vec<Painting>>, ApiError> {
    let paintings = state.service.get_all_paintings_made_in_year(year).await?;
    Ok(Json(paintings))
}

/// GET /painting/oldest
async fn oldest_year(
    State(state): State<Arc<AppState>>,
) -> Result<Json<OldestYearResponse>, ApiError> {
    let oldest_year = state.service.get_oldest_painting_year().await?;
    Ok(Json(OldestYearResponse { oldest_year }))
}

/// Painting routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/painting", get(list_paintings).post(create_painting))
        .route("/painting/year/{year}", get(list_paintings_in_year))
        .route("/painting/oldest", get(oldest_year))
}
