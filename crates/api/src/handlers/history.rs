//! Handlers for the `/history` audit log.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use loto_core::error::require_text;
use loto_db::models::history::{CreateHistoryEntry, HistoryNote};
use loto_db::repositories::HistoryRepo;
use serde::Serialize;

use crate::error::AppResult;
use crate::middleware::mode::{Mode, RequireEditor};
use crate::query::HistoryParams;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ClearedHistory {
    pub deleted: u64,
}

/// GET /api/v1/history?limit=
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<HistoryParams>,
) -> AppResult<impl IntoResponse> {
    let entries = HistoryRepo::list(&state.pool, params.limit).await?;
    Ok(Json(DataResponse { data: entries }))
}

/// POST /api/v1/history
///
/// Open to both modes; the entry is stamped with the caller's mode. Unlike
/// the entries written alongside a mutation, a failure here is returned.
pub async fn create(
    Mode(mode): Mode,
    State(state): State<AppState>,
    Json(note): Json<HistoryNote>,
) -> AppResult<impl IntoResponse> {
    require_text("action", &note.action)?;

    let entry = HistoryRepo::create(
        &state.pool,
        &CreateHistoryEntry {
            breaker_id: note.breaker_id,
            action: note.action.trim().to_string(),
            user_mode: mode,
            details: note.details,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: entry })))
}

/// DELETE /api/v1/history
pub async fn clear(
    RequireEditor(_mode): RequireEditor,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let deleted = HistoryRepo::clear(&state.pool).await?;
    tracing::warn!(deleted, "History log cleared");
    Ok(Json(DataResponse {
        data: ClearedHistory { deleted },
    }))
}
