use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use loto_core::error::CoreError;
use serde_json::json;

/// Application-level error type for HTTP handlers and the lockout engine.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Renders as `{ "error": <message>, "code": <CODE> }`.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Database error: {0}")]
    Database(#[source] sqlx::Error),

    #[error("Bad request: {0}")]
    BadRequest(String),
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Shorthand for a missing row addressed by id.
    pub fn not_found(entity: &'static str, id: loto_core::types::DbId) -> Self {
        AppError::Core(CoreError::NotFound { entity, id })
    }
}

/// Constraint violations the caller can act on become domain errors.
///
/// - Unique violations on `uq_*` constraints (duplicate key number or id
///   card) become [`CoreError::Conflict`].
/// - Foreign-key violations (a history note naming a missing breaker) become
///   [`AppError::BadRequest`].
/// - Everything else stays [`AppError::Database`].
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            match db_err.code().as_deref() {
                Some("23505") => {
                    if let Some(constraint) = db_err.constraint().filter(|c| c.starts_with("uq_")) {
                        return AppError::Core(CoreError::Conflict(format!(
                            "Duplicate value violates unique constraint: {constraint}"
                        )));
                    }
                }
                Some("23503") => {
                    return AppError::BadRequest("Referenced record does not exist".to_string());
                }
                _ => {}
            }
        }
        AppError::Database(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
                CoreError::Unauthorized(msg) => {
                    (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone())
                }
                CoreError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone()),
            },

            AppError::Database(err) => classify_sqlx_error(err),

            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Map an unclassified sqlx error onto an HTTP status, error code and message.
///
/// `RowNotFound` is 404; everything else is 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        ),
        other => {
            tracing::error!(error = %other, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            )
        }
    }
}
