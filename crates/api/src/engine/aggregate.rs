//! Read-only dashboard views. Computed from breaker rows on every call and
//! never routed through the write gate.

use loto_core::lockout::{lock_drift, plan_resync, LockDrift};
use loto_core::stats::{locks_by_zone, stats_from_breakers, Stats, ZoneGroup};
use loto_db::models::breaker::{Breaker, BreakerFilter};
use loto_db::models::lock::{Lock, LockFilter};
use loto_db::repositories::{BreakerRepo, LockRepo, PersonnelRepo};
use loto_db::DbPool;

pub async fn dashboard_stats(pool: &DbPool) -> Result<Stats, sqlx::Error> {
    let breakers = BreakerRepo::list(pool, &BreakerFilter::default()).await?;
    let facts: Vec<_> = breakers.iter().map(Breaker::facts).collect();
    let total_locks = LockRepo::count(pool).await?;
    let total_personnel = PersonnelRepo::count(pool).await?;
    Ok(stats_from_breakers(&facts, total_locks, total_personnel))
}

pub async fn zone_groups(pool: &DbPool) -> Result<Vec<ZoneGroup>, sqlx::Error> {
    let locked = BreakerRepo::list_locked_with_keys(pool).await?;
    let facts: Vec<_> = locked.iter().map(Breaker::facts).collect();
    Ok(locks_by_zone(&facts))
}

/// Lock rows whose usage disagrees with what a resync would write.
pub async fn drift_report(pool: &DbPool) -> Result<Vec<LockDrift>, sqlx::Error> {
    let locked = BreakerRepo::list_locked_with_keys(pool).await?;
    let claims = plan_resync(locked.iter().map(Breaker::holding));
    let locks = LockRepo::list(pool, &LockFilter::default()).await?;
    let views: Vec<_> = locks.iter().map(Lock::row_view).collect();

    let drift = lock_drift(&views, &claims);
    if !drift.is_empty() {
        tracing::debug!(drifted = drift.len(), "Lock table differs from breakers");
    }
    Ok(drift)
}
