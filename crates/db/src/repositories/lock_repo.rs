//! Repository for the `locks` table.

use loto_core::lockout::LockChange;
use loto_core::types::DbId;
use sqlx::{PgExecutor, PgPool};

use crate::models::lock::{Lock, LockFilter, LockInput};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, key_number, zone, used, assigned_to, remarks";

/// Provides CRUD and usage operations for padlocks.
pub struct LockRepo;

impl LockRepo {
    /// Insert a new lock, returning the created row.
    ///
    /// Fails with a `uq_locks_key_number` violation if the key already exists.
    pub async fn create(pool: &PgPool, input: &LockInput) -> Result<Lock, sqlx::Error> {
        let query = format!(
            "INSERT INTO locks (key_number, zone, used, assigned_to, remarks)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Lock>(&query)
            .bind(&input.key_number)
            .bind(&input.zone)
            .bind(input.used)
            .bind(&input.assigned_to)
            .bind(&input.remarks)
            .fetch_one(pool)
            .await
    }

    /// Find a lock by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Lock>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM locks WHERE id = $1");
        sqlx::query_as::<_, Lock>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a lock by its unique key number.
    pub async fn find_by_key(pool: &PgPool, key_number: &str) -> Result<Option<Lock>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM locks WHERE key_number = $1");
        sqlx::query_as::<_, Lock>(&query)
            .bind(key_number)
            .fetch_optional(pool)
            .await
    }

    /// List locks matching the optional zone / used filters.
    pub async fn list(pool: &PgPool, filter: &LockFilter) -> Result<Vec<Lock>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM locks
             WHERE ($1::TEXT IS NULL OR zone = $1)
               AND ($2::BOOL IS NULL OR used = $2)
             ORDER BY zone, key_number"
        );
        sqlx::query_as::<_, Lock>(&query)
            .bind(&filter.zone)
            .bind(filter.used)
            .fetch_all(pool)
            .await
    }

    /// Replace every column of a lock. Returns `None` if the id does not exist.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &LockInput,
    ) -> Result<Option<Lock>, sqlx::Error> {
        let query = format!(
            "UPDATE locks SET
                key_number = $2,
                zone = $3,
                used = $4,
                assigned_to = $5,
                remarks = $6
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Lock>(&query)
            .bind(id)
            .bind(&input.key_number)
            .bind(&input.zone)
            .bind(input.used)
            .bind(&input.assigned_to)
            .bind(&input.remarks)
            .fetch_optional(pool)
            .await
    }

    /// Permanently delete a lock. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM locks WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Apply one reconciliation change.
    ///
    /// Returns `None` when no lock has that key; an unresolved key is not an
    /// error.
    pub async fn apply_change(
        pool: &PgPool,
        change: &LockChange,
    ) -> Result<Option<Lock>, sqlx::Error> {
        match change {
            LockChange::Release { key } => Self::set_usage(pool, key, false, None).await,
            LockChange::Claim { key, assigned_to } => {
                Self::set_usage(pool, key, true, Some(assigned_to)).await
            }
        }
    }

    /// Rebuild lock usage in one transaction: release every lock, then apply
    /// `claims` in order.
    ///
    /// Returns the number of claims that matched an existing lock row.
    pub async fn resync(pool: &PgPool, claims: &[LockChange]) -> Result<u64, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let released = sqlx::query("UPDATE locks SET used = FALSE, assigned_to = NULL")
            .execute(&mut *tx)
            .await?
            .rows_affected();
        tracing::debug!(released, "All locks marked available");

        let mut matched = 0u64;
        for change in claims {
            let LockChange::Claim { key, assigned_to } = change else {
                continue;
            };
            if Self::set_usage(&mut *tx, key, true, Some(assigned_to))
                .await?
                .is_some()
            {
                matched += 1;
            } else {
                tracing::warn!(
                    lock_key = %key,
                    breaker = %assigned_to,
                    "Breaker references a lock that does not exist",
                );
            }
        }

        tx.commit().await?;
        Ok(matched)
    }

    /// Total number of locks.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*)::BIGINT FROM locks")
            .fetch_one(pool)
            .await
    }

    async fn set_usage<'e, E>(
        executor: E,
        key_number: &str,
        used: bool,
        assigned_to: Option<&str>,
    ) -> Result<Option<Lock>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "UPDATE locks SET used = $2, assigned_to = $3
             WHERE key_number = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Lock>(&query)
            .bind(key_number)
            .bind(used)
            .bind(if used { assigned_to } else { None })
            .fetch_optional(executor)
            .await
    }
}
