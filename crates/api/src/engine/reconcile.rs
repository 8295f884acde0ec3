//! Breaker and lock mutations with lock reconciliation.

use loto_core::audit::{self, UserMode};
use loto_core::breaker::validate_breaker_fields;
use loto_core::error::require_text;
use loto_core::lockout::{plan_create, plan_delete, plan_resync, plan_update};
use loto_core::types::DbId;
use loto_db::models::breaker::{Breaker, CreateBreaker, UpdateBreaker};
use loto_db::models::lock::{Lock, LockInput};
use loto_db::repositories::{BreakerRepo, LockRepo};
use serde::Serialize;

use super::audit::record;
use super::LockoutEngine;
use crate::error::{AppError, AppResult};

/// Result of a full lock resync.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResyncReport {
    /// Claims that matched an existing lock row.
    pub updated_count: u64,
}

impl LockoutEngine {
    // -----------------------------------------------------------------------
    // Breakers
    // -----------------------------------------------------------------------

    /// Insert a breaker and claim its lock if it is created Closed with a key.
    pub async fn create_breaker(&self, mode: UserMode, input: &CreateBreaker) -> AppResult<Breaker> {
        let input = input.normalized();
        validate_breaker_fields(&input.name, &input.zone, &input.location)?;

        let _gate = self.write_gate.lock().await;

        let breaker = BreakerRepo::create(&self.pool, &input).await?;
        self.apply_lock_changes(&plan_create(&breaker.holding()), &[breaker.name.as_str()])
            .await?;

        tracing::info!(
            breaker_id = breaker.id,
            name = %breaker.name,
            state = %breaker.state,
            lock_key = ?breaker.lock_key,
            "Breaker created",
        );

        record(
            &self.pool,
            mode,
            Some(breaker.id),
            audit::breaker_added(&breaker.name, &breaker.zone, &breaker.location, breaker.state),
        )
        .await;

        Ok(breaker)
    }

    /// Replace a breaker row and reconcile its lock.
    pub async fn update_breaker(
        &self,
        mode: UserMode,
        id: DbId,
        input: &UpdateBreaker,
    ) -> AppResult<Breaker> {
        let _gate = self.write_gate.lock().await;
        self.update_breaker_ungated(mode, id, input).await
    }

    /// Update body shared with the cascade. Callers must hold the write gate.
    pub(super) async fn update_breaker_ungated(
        &self,
        mode: UserMode,
        id: DbId,
        input: &UpdateBreaker,
    ) -> AppResult<Breaker> {
        let input = input.normalized();
        validate_breaker_fields(&input.name, &input.zone, &input.location)?;

        // The diff needs the row as it was before this write.
        let old = BreakerRepo::find_by_id(&self.pool, id)
            .await?
            .ok_or(AppError::not_found("Breaker", id))?;

        let updated = BreakerRepo::update(&self.pool, id, &input)
            .await?
            .ok_or(AppError::not_found("Breaker", id))?;

        let changes = plan_update(&old.holding(), &updated.holding());
        self.apply_lock_changes(&changes, &[old.name.as_str(), updated.name.as_str()])
            .await?;

        if old.name != updated.name {
            let moved =
                BreakerRepo::rename_parent_refs(&self.pool, &old.name, &updated.name, id).await?;
            if moved > 0 {
                tracing::info!(
                    breaker_id = id,
                    old_name = %old.name,
                    new_name = %updated.name,
                    children = moved,
                    "Re-pointed child breakers after rename",
                );
            }
        }

        tracing::info!(
            breaker_id = id,
            name = %updated.name,
            old_state = %old.state,
            new_state = %updated.state,
            lock_changes = changes.len(),
            "Breaker updated",
        );

        record(
            &self.pool,
            mode,
            Some(id),
            audit::breaker_updated(&updated.name, &updated.zone, &updated.location, updated.state),
        )
        .await;

        Ok(updated)
    }

    /// Release the breaker's lock if it holds one, then delete the row.
    pub async fn delete_breaker(&self, mode: UserMode, id: DbId) -> AppResult<()> {
        let _gate = self.write_gate.lock().await;

        let breaker = BreakerRepo::find_by_id(&self.pool, id)
            .await?
            .ok_or(AppError::not_found("Breaker", id))?;

        self.apply_lock_changes(&plan_delete(&breaker.holding()), &[breaker.name.as_str()])
            .await?;

        if !BreakerRepo::delete(&self.pool, id).await? {
            return Err(AppError::not_found("Breaker", id));
        }

        tracing::info!(breaker_id = id, name = %breaker.name, "Breaker deleted");

        record(&self.pool, mode, None, audit::breaker_deleted(&breaker.name)).await;

        Ok(())
    }

    // -----------------------------------------------------------------------
    // Locks
    // -----------------------------------------------------------------------

    /// Insert a lock.
    ///
    /// If a Closed breaker already references the key, the new lock starts
    /// out in use and assigned to that breaker, whatever the input says.
    pub async fn create_lock(&self, mode: UserMode, input: &LockInput) -> AppResult<Lock> {
        let mut input = input.normalized();
        validate_lock_fields(&input)?;

        let _gate = self.write_gate.lock().await;

        if let Some(holder) = BreakerRepo::find_closed_holder(&self.pool, &input.key_number).await? {
            tracing::info!(
                lock_key = %input.key_number,
                breaker_id = holder.id,
                breaker = %holder.name,
                "New lock resolves a pending breaker reference",
            );
            input.used = true;
            input.assigned_to = Some(holder.name);
        }

        let lock = LockRepo::create(&self.pool, &input).await?;
        tracing::info!(lock_id = lock.id, lock_key = %lock.key_number, used = lock.used, "Lock created");

        record(
            &self.pool,
            mode,
            None,
            audit::lock_added(&lock.key_number, &lock.zone, lock.used),
        )
        .await;

        Ok(lock)
    }

    /// Replace a lock row as edited by hand.
    pub async fn update_lock(&self, mode: UserMode, id: DbId, input: &LockInput) -> AppResult<Lock> {
        let input = input.normalized();
        validate_lock_fields(&input)?;

        let _gate = self.write_gate.lock().await;

        let lock = LockRepo::update(&self.pool, id, &input)
            .await?
            .ok_or(AppError::not_found("Lock", id))?;

        tracing::info!(
            lock_id = id,
            lock_key = %lock.key_number,
            used = lock.used,
            assigned_to = ?lock.assigned_to,
            "Lock updated",
        );

        record(
            &self.pool,
            mode,
            None,
            audit::lock_updated(&lock.key_number, &lock.zone, lock.used),
        )
        .await;

        Ok(lock)
    }

    pub async fn delete_lock(&self, mode: UserMode, id: DbId) -> AppResult<()> {
        let _gate = self.write_gate.lock().await;

        let lock = LockRepo::find_by_id(&self.pool, id)
            .await?
            .ok_or(AppError::not_found("Lock", id))?;

        if !LockRepo::delete(&self.pool, id).await? {
            return Err(AppError::not_found("Lock", id));
        }

        if lock.used {
            tracing::warn!(
                lock_id = id,
                lock_key = %lock.key_number,
                assigned_to = ?lock.assigned_to,
                "Deleted a lock that was in use",
            );
        } else {
            tracing::info!(lock_id = id, lock_key = %lock.key_number, "Lock deleted");
        }

        record(&self.pool, mode, None, audit::lock_deleted(&lock.key_number)).await;

        Ok(())
    }

    /// Rebuild lock usage from breaker rows alone.
    ///
    /// Releases every lock and re-claims one per Closed breaker with a key,
    /// in one transaction. Safe to run repeatedly.
    pub async fn resync_locks(&self, mode: UserMode) -> AppResult<ResyncReport> {
        let _gate = self.write_gate.lock().await;

        let locked = BreakerRepo::list_locked_with_keys(&self.pool).await?;
        let claims = plan_resync(locked.iter().map(Breaker::holding));
        let updated_count = LockRepo::resync(&self.pool, &claims).await?;

        tracing::info!(
            claims = claims.len(),
            updated_count,
            "Lock usage resynchronized",
        );

        record(&self.pool, mode, None, audit::locks_resynced(updated_count)).await;

        Ok(ResyncReport { updated_count })
    }
}

fn validate_lock_fields(input: &LockInput) -> Result<(), loto_core::error::CoreError> {
    require_text("key_number", &input.key_number)?;
    require_text("zone", &input.zone)
}
