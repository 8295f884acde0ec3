use axum::routing::{get, post};
use axum::Router;

use crate::handlers::locks;
use crate::state::AppState;

/// Routes mounted at `/locks`.
///
/// ```text
/// GET    /          -> list
/// POST   /          -> create
/// POST   /resync    -> resync
/// GET    /{id}      -> get_by_id
/// PUT    /{id}      -> update
/// DELETE /{id}      -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(locks::list).post(locks::create))
        .route("/resync", post(locks::resync))
        .route(
            "/{id}",
            get(locks::get_by_id).put(locks::update).delete(locks::delete),
        )
}
