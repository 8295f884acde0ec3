use axum::routing::get;
use axum::Router;

use crate::handlers::stats;
use crate::state::AppState;

/// Routes mounted at `/stats`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(stats::overview))
        .route("/zones", get(stats::zones))
        .route("/lock-drift", get(stats::lock_drift))
}
