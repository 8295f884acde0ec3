//! Handlers for the `/breakers` resource.
//!
//! Reads are open to both modes; every write requires Editor mode and goes
//! through the [`LockoutEngine`](crate::engine::LockoutEngine).

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use loto_core::types::DbId;
use loto_db::models::breaker::{BreakerFilter, CreateBreaker, UpdateBreaker};
use loto_db::repositories::BreakerRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::mode::RequireEditor;
use crate::query::LocationParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/breakers?zone=&location=&state=
pub async fn list(
    State(state): State<AppState>,
    Query(filter): Query<BreakerFilter>,
) -> AppResult<impl IntoResponse> {
    let breakers = BreakerRepo::list(&state.pool, &filter).await?;
    Ok(Json(DataResponse { data: breakers }))
}

/// GET /api/v1/breakers/zones
pub async fn zones(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let zones = BreakerRepo::distinct_zones(&state.pool).await?;
    Ok(Json(DataResponse { data: zones }))
}

/// GET /api/v1/breakers/locations?zone=
pub async fn locations(
    State(state): State<AppState>,
    Query(params): Query<LocationParams>,
) -> AppResult<impl IntoResponse> {
    let locations = BreakerRepo::distinct_locations(&state.pool, params.zone.as_deref()).await?;
    Ok(Json(DataResponse { data: locations }))
}

/// GET /api/v1/breakers/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let breaker = BreakerRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("Breaker", id))?;
    Ok(Json(DataResponse { data: breaker }))
}

/// POST /api/v1/breakers
pub async fn create(
    RequireEditor(mode): RequireEditor,
    State(state): State<AppState>,
    Json(input): Json<CreateBreaker>,
) -> AppResult<impl IntoResponse> {
    let breaker = state.engine.create_breaker(mode, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: breaker })))
}

/// PUT /api/v1/breakers/{id}
pub async fn update(
    RequireEditor(mode): RequireEditor,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateBreaker>,
) -> AppResult<impl IntoResponse> {
    let breaker = state.engine.update_breaker(mode, id, &input).await?;
    Ok(Json(DataResponse { data: breaker }))
}

/// PUT /api/v1/breakers/{id}/cascade
///
/// Same as [`update`], then pushes an Off / Closed state to direct children.
pub async fn update_cascading(
    RequireEditor(mode): RequireEditor,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateBreaker>,
) -> AppResult<impl IntoResponse> {
    let outcome = state.engine.update_breaker_cascading(mode, id, &input).await?;
    Ok(Json(DataResponse { data: outcome }))
}

/// DELETE /api/v1/breakers/{id}
pub async fn delete(
    RequireEditor(mode): RequireEditor,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    state.engine.delete_breaker(mode, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
