use axum::routing::get;
use axum::Router;

use crate::handlers::history;
use crate::state::AppState;

/// Routes mounted at `/history`.
///
/// ```text
/// GET    /    -> list (?limit=)
/// POST   /    -> create
/// DELETE /    -> clear
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/",
        get(history::list)
            .post(history::create)
            .delete(history::clear),
    )
}
