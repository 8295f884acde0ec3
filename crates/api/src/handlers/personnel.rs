//! Handlers for the `/personnel` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use loto_core::audit;
use loto_core::error::{require_text, CoreError};
use loto_core::types::DbId;
use loto_db::models::personnel::PersonnelInput;
use loto_db::repositories::PersonnelRepo;

use crate::engine::audit::record;
use crate::error::{AppError, AppResult};
use crate::middleware::mode::RequireEditor;
use crate::response::DataResponse;
use crate::state::AppState;

fn validate(input: &PersonnelInput) -> Result<(), CoreError> {
    require_text("name", &input.name)?;
    require_text("lastname", &input.lastname)?;
    require_text("id_card", &input.id_card)
}

/// GET /api/v1/personnel
pub async fn list(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let people = PersonnelRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: people }))
}

/// GET /api/v1/personnel/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let person = PersonnelRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("Personnel", id))?;
    Ok(Json(DataResponse { data: person }))
}

/// POST /api/v1/personnel
pub async fn create(
    RequireEditor(mode): RequireEditor,
    State(state): State<AppState>,
    Json(input): Json<PersonnelInput>,
) -> AppResult<impl IntoResponse> {
    validate(&input)?;
    let person = PersonnelRepo::create(&state.pool, &input).await?;
    tracing::info!(personnel_id = person.id, "Personnel created");

    record(
        &state.pool,
        mode,
        None,
        audit::personnel_added(&person.name, &person.lastname, person.habilitation.as_deref()),
    )
    .await;

    Ok((StatusCode::CREATED, Json(DataResponse { data: person })))
}

/// PUT /api/v1/personnel/{id}
pub async fn update(
    RequireEditor(mode): RequireEditor,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<PersonnelInput>,
) -> AppResult<impl IntoResponse> {
    validate(&input)?;
    let person = PersonnelRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::not_found("Personnel", id))?;
    tracing::info!(personnel_id = id, "Personnel updated");

    record(
        &state.pool,
        mode,
        None,
        audit::personnel_updated(&person.name, &person.lastname, &person.id_card),
    )
    .await;

    Ok(Json(DataResponse { data: person }))
}

/// DELETE /api/v1/personnel/{id}
pub async fn delete(
    RequireEditor(mode): RequireEditor,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let person = PersonnelRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("Personnel", id))?;
    if !PersonnelRepo::delete(&state.pool, id).await? {
        return Err(AppError::not_found("Personnel", id));
    }
    tracing::info!(personnel_id = id, "Personnel deleted");

    record(
        &state.pool,
        mode,
        None,
        audit::personnel_deleted(&person.name, &person.lastname),
    )
    .await;

    Ok(StatusCode::NO_CONTENT)
}
