use crate::engine::LockoutEngine;
use crate::settings::SettingsStore;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheap to clone: every field is a pool handle or shares its inner state.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool, used directly by read-only handlers.
    pub pool: loto_db::DbPool,
    /// Every breaker and lock mutation goes through here.
    pub engine: LockoutEngine,
    pub settings: SettingsStore,
}

impl AppState {
    pub fn new(pool: loto_db::DbPool, settings: SettingsStore) -> Self {
        Self {
            engine: LockoutEngine::new(pool.clone()),
            pool,
            settings,
        }
    }
}
