//! Editor / Visitor mode extractors.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use loto_core::access::{require_editor, resolve_mode};
use loto_core::audit::UserMode;
use loto_core::error::CoreError;

use crate::error::AppError;
use crate::state::AppState;

/// Header carrying the shared access code.
pub const ACCESS_CODE_HEADER: &str = "x-access-code";

/// The caller's resolved mode.
///
/// No header means Visitor. A header that does not match the stored code
/// is rejected with 401 rather than downgraded.
///
/// ```ignore
/// async fn add_note(Mode(mode): Mode) -> AppResult<StatusCode> {
///     tracing::info!(%mode, "recording note");
///     Ok(StatusCode::CREATED)
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Mode(pub UserMode);

impl FromRequestParts<AppState> for Mode {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let supplied = match parts.headers.get(ACCESS_CODE_HEADER) {
            None => None,
            Some(value) => Some(value.to_str().map_err(|_| {
                AppError::Core(CoreError::Unauthorized("Invalid access code".into()))
            })?),
        };

        let expected = state.settings.access_code().await;
        let mode = resolve_mode(supplied, &expected)?;
        Ok(Mode(mode))
    }
}

/// Requires Editor mode. Rejects with 403 Forbidden otherwise.
///
/// ```ignore
/// async fn delete(RequireEditor(mode): RequireEditor) -> AppResult<StatusCode> {
///     Ok(StatusCode::NO_CONTENT)
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct RequireEditor(pub UserMode);

impl FromRequestParts<AppState> for RequireEditor {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Mode(mode) = Mode::from_request_parts(parts, state).await?;
        require_editor(mode)?;
        Ok(RequireEditor(mode))
    }
}
