pub mod breakers;
pub mod health;
pub mod history;
pub mod locks;
pub mod personnel;
pub mod plans;
pub mod settings;
pub mod stats;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /breakers                         list, create (editor)
/// /breakers/zones                   distinct zones
/// /breakers/locations               distinct locations (?zone=)
/// /breakers/{id}                    get, update, delete (editor)
/// /breakers/{id}/cascade            update + cascade to children (editor)
///
/// /locks                            list, create (editor)
/// /locks/resync                     rebuild lock usage (editor)
/// /locks/{id}                       get, update, delete (editor)
///
/// /personnel                        list, create (editor)
/// /personnel/{id}                   get, update, delete (editor)
///
/// /plans                            list, create (editor)
/// /plans/{id}                       get, delete (editor)
///
/// /history                          list (?limit=), add note (any mode), clear (editor)
///
/// /stats                            dashboard counters
/// /stats/zones                      locks in use by zone
/// /stats/lock-drift                 lock rows disagreeing with breakers
///
/// /settings                         update (editor)
/// /settings/app-info                name and version
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/breakers", breakers::router())
        .nest("/locks", locks::router())
        .nest("/personnel", personnel::router())
        .nest("/plans", plans::router())
        .nest("/history", history::router())
        .nest("/stats", stats::router())
        .nest("/settings", settings::router())
}
