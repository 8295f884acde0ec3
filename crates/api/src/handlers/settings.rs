//! Handlers for `/settings`.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use loto_db::models::settings::UpdateAppSettings;
use serde::Serialize;

use crate::error::AppResult;
use crate::middleware::mode::RequireEditor;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct AppInfo {
    pub app_name: String,
    pub app_version: String,
}

/// GET /api/v1/settings/app-info
pub async fn app_info(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let settings = state.settings.snapshot().await;
    Ok(Json(DataResponse {
        data: AppInfo {
            app_name: settings.app_name,
            app_version: settings.app_version,
        },
    }))
}

/// PUT /api/v1/settings
///
/// The access code is never echoed back.
pub async fn update(
    RequireEditor(_mode): RequireEditor,
    State(state): State<AppState>,
    Json(input): Json<UpdateAppSettings>,
) -> AppResult<impl IntoResponse> {
    let saved = state.settings.update(&state.pool, &input).await?;
    Ok(Json(DataResponse { data: saved }))
}
