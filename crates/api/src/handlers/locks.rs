//! Handlers for the `/locks` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use loto_core::types::DbId;
use loto_db::models::lock::{LockFilter, LockInput};
use loto_db::repositories::LockRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::mode::RequireEditor;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/locks?zone=&used=
pub async fn list(
    State(state): State<AppState>,
    Query(filter): Query<LockFilter>,
) -> AppResult<impl IntoResponse> {
    let locks = LockRepo::list(&state.pool, &filter).await?;
    Ok(Json(DataResponse { data: locks }))
}

/// GET /api/v1/locks/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let lock = LockRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("Lock", id))?;
    Ok(Json(DataResponse { data: lock }))
}

/// POST /api/v1/locks
pub async fn create(
    RequireEditor(mode): RequireEditor,
    State(state): State<AppState>,
    Json(input): Json<LockInput>,
) -> AppResult<impl IntoResponse> {
    let lock = state.engine.create_lock(mode, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: lock })))
}

/// PUT /api/v1/locks/{id}
pub async fn update(
    RequireEditor(mode): RequireEditor,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<LockInput>,
) -> AppResult<impl IntoResponse> {
    let lock = state.engine.update_lock(mode, id, &input).await?;
    Ok(Json(DataResponse { data: lock }))
}

/// DELETE /api/v1/locks/{id}
pub async fn delete(
    RequireEditor(mode): RequireEditor,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    state.engine.delete_lock(mode, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/locks/resync
///
/// Rebuild `used` / `assigned_to` for every lock from the breaker table.
pub async fn resync(
    RequireEditor(mode): RequireEditor,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let report = state.engine.resync_locks(mode).await?;
    Ok(Json(DataResponse { data: report }))
}
