//! Handlers for the `/plans` resource (metadata only; file bytes live elsewhere).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use loto_core::audit;
use loto_core::error::require_text;
use loto_core::types::DbId;
use loto_db::models::plan::CreatePlan;
use loto_db::repositories::PlanRepo;

use crate::engine::audit::record;
use crate::error::{AppError, AppResult};
use crate::middleware::mode::RequireEditor;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/plans
pub async fn list(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let plans = PlanRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: plans }))
}

/// GET /api/v1/plans/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let plan = PlanRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("Plan", id))?;
    Ok(Json(DataResponse { data: plan }))
}

/// POST /api/v1/plans
pub async fn create(
    RequireEditor(mode): RequireEditor,
    State(state): State<AppState>,
    Json(input): Json<CreatePlan>,
) -> AppResult<impl IntoResponse> {
    require_text("filename", &input.filename)?;
    require_text("file_path", &input.file_path)?;

    let plan = PlanRepo::create(&state.pool, &input).await?;
    tracing::info!(plan_id = plan.id, filename = %plan.filename, "Plan registered");

    record(
        &state.pool,
        mode,
        None,
        audit::plan_uploaded(&plan.filename, plan.version.as_deref()),
    )
    .await;

    Ok((StatusCode::CREATED, Json(DataResponse { data: plan })))
}

/// DELETE /api/v1/plans/{id}
pub async fn delete(
    RequireEditor(mode): RequireEditor,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let plan = PlanRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("Plan", id))?;
    if !PlanRepo::delete(&state.pool, id).await? {
        return Err(AppError::not_found("Plan", id));
    }
    tracing::info!(plan_id = id, "Plan deleted");

    record(&state.pool, mode, None, audit::plan_deleted(&plan.filename)).await;

    Ok(StatusCode::NO_CONTENT)
}
