//! Handlers for the `/stats` dashboard views.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;

use crate::engine::aggregate;
use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/stats
pub async fn overview(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let stats = aggregate::dashboard_stats(&state.pool).await?;
    Ok(Json(DataResponse { data: stats }))
}

/// GET /api/v1/stats/zones
pub async fn zones(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let groups = aggregate::zone_groups(&state.pool).await?;
    Ok(Json(DataResponse { data: groups }))
}

/// GET /api/v1/stats/lock-drift
pub async fn lock_drift(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let drift = aggregate::drift_report(&state.pool).await?;
    Ok(Json(DataResponse { data: drift }))
}
