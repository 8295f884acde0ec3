use axum::routing::{get, put};
use axum::Router;

use crate::handlers::breakers;
use crate::state::AppState;

/// Routes mounted at `/breakers`.
///
/// ```text
/// GET    /                -> list
/// POST   /                -> create
/// GET    /zones           -> zones
/// GET    /locations       -> locations
/// GET    /{id}            -> get_by_id
/// PUT    /{id}            -> update
/// DELETE /{id}            -> delete
/// PUT    /{id}/cascade    -> update_cascading
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(breakers::list).post(breakers::create))
        .route("/zones", get(breakers::zones))
        .route("/locations", get(breakers::locations))
        .route(
            "/{id}",
            get(breakers::get_by_id)
                .put(breakers::update)
                .delete(breakers::delete),
        )
        .route("/{id}/cascade", put(breakers::update_cascading))
}
