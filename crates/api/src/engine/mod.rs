//! Lockout service layer.
//!
//! [`LockoutEngine`] owns every write that can touch `locks.used` or
//! `locks.assigned_to`: breaker create / update / delete, the cascade, direct
//! lock edits and the full resync. Each of these holds a single write gate
//! for its whole read, write, compensate and log sequence, so two writers
//! never interleave on the lock table. Reads go straight to the pool and
//! never wait on the gate.

pub mod aggregate;
pub mod audit;
pub mod cascade;
pub mod reconcile;

use std::sync::Arc;

use loto_core::lockout::LockChange;
use loto_db::repositories::LockRepo;
use loto_db::DbPool;
use tokio::sync::Mutex;

pub use cascade::CascadeOutcome;
pub use reconcile::ResyncReport;

/// Serialized mutation path for breakers and locks.
#[derive(Clone)]
pub struct LockoutEngine {
    pool: DbPool,
    write_gate: Arc<Mutex<()>>,
}

impl LockoutEngine {
    pub fn new(pool: DbPool) -> Self {
        Self {
            pool,
            write_gate: Arc::new(Mutex::new(())),
        }
    }

    /// Apply planned lock changes in order.
    ///
    /// `own_names` are the names the acting breaker had before and after the
    /// write; a claim over a lock held by any other name is logged as an
    /// overwrite and then applied anyway (last write wins).
    async fn apply_lock_changes(
        &self,
        changes: &[LockChange],
        own_names: &[&str],
    ) -> Result<(), sqlx::Error> {
        for change in changes {
            if let LockChange::Claim { key, assigned_to } = change {
                self.warn_on_overwrite(key, assigned_to, own_names).await?;
            }

            match LockRepo::apply_change(&self.pool, change).await? {
                Some(lock) => tracing::debug!(
                    lock_key = %lock.key_number,
                    used = lock.used,
                    assigned_to = ?lock.assigned_to,
                    "Lock usage updated",
                ),
                None => tracing::debug!(
                    lock_key = %change.key(),
                    "No lock with this key number, reference left unresolved",
                ),
            }
        }
        Ok(())
    }

    async fn warn_on_overwrite(
        &self,
        key: &str,
        claimant: &str,
        own_names: &[&str],
    ) -> Result<(), sqlx::Error> {
        let Some(current) = LockRepo::find_by_key(&self.pool, key).await? else {
            return Ok(());
        };
        if !current.used {
            return Ok(());
        }
        if let Some(holder) = current.assigned_to.as_deref() {
            if !own_names.contains(&holder) {
                tracing::warn!(
                    lock_key = %key,
                    previous_holder = %holder,
                    new_holder = %claimant,
                    "Lock already assigned to another breaker, overwriting",
                );
            }
        }
        Ok(())
    }
}
