use axum::routing::get;
use axum::Router;

use crate::handlers::plans;
use crate::state::AppState;

/// Routes mounted at `/plans`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(plans::list).post(plans::create))
        .route("/{id}", get(plans::get_by_id).delete(plans::delete))
}
