use axum::routing::get;
use axum::Router;

use crate::handlers::personnel;
use crate::state::AppState;

/// Routes mounted at `/personnel`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(personnel::list).post(personnel::create))
        .route(
            "/{id}",
            get(personnel::get_by_id)
                .put(personnel::update)
                .delete(personnel::delete),
        )
}
