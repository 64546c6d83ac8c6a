//! Statistics endpoint.

use axum::{Json, extract::State};

use crate::dto::StatsResponse;
use crate::error::ApiError;
use crate::state::AppState;

/// Get store statistics.
#[utoipa::path(
    get,
    path = "/stats",
    responses(
        (status = 200, description = "Store statistics", body = StatsResponse),
        (status = 500, description = "Internal server error"),
    ),
    tag = "system"
)]
pub async fn get_stats(State(state): State<AppState>) -> Result<Json<StatsResponse>, ApiError> {
    let stats = state.movie_repo.get_stats().await?;
    Ok(Json(StatsResponse::from(stats)))
}
