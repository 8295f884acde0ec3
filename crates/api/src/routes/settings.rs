use axum::routing::{get, put};
use axum::Router;

use crate::handlers::settings;
use crate::state::AppState;

/// Routes mounted at `/settings`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", put(settings::update))
        .route("/app-info", get(settings::app_info))
}
