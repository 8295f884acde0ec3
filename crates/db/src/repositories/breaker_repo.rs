//! Repository for the `breakers` table.

use loto_core::types::DbId;
use sqlx::PgPool;

use crate::models::breaker::{Breaker, BreakerFilter, CreateBreaker, UpdateBreaker};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, name, zone, location, state, lock_key, general_breaker, last_updated";

/// Display order used by every list query.
const ORDER: &str = "ORDER BY zone, location, name, id";

/// Provides CRUD and lookup operations for breakers.
pub struct BreakerRepo;

impl BreakerRepo {
    /// Insert a new breaker, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateBreaker) -> Result<Breaker, sqlx::Error> {
        let query = format!(
            "INSERT INTO breakers (name, zone, location, state, lock_key, general_breaker)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Breaker>(&query)
            .bind(&input.name)
            .bind(&input.zone)
            .bind(&input.location)
            .bind(input.state.as_str())
            .bind(&input.lock_key)
            .bind(&input.general_breaker)
            .fetch_one(pool)
            .await
    }

    /// Find a breaker by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Breaker>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM breakers WHERE id = $1");
        sqlx::query_as::<_, Breaker>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List breakers matching the optional zone / location / state filters.
    pub async fn list(pool: &PgPool, filter: &BreakerFilter) -> Result<Vec<Breaker>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM breakers
             WHERE ($1::TEXT IS NULL OR zone = $1)
               AND ($2::TEXT IS NULL OR location = $2)
               AND ($3::TEXT IS NULL OR state = $3)
             {ORDER}"
        );
        sqlx::query_as::<_, Breaker>(&query)
            .bind(&filter.zone)
            .bind(&filter.location)
            .bind(filter.state.map(|s| s.as_str()))
            .fetch_all(pool)
            .await
    }

    /// Replace every mutable column of a breaker and stamp `last_updated`.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateBreaker,
    ) -> Result<Option<Breaker>, sqlx::Error> {
        let query = format!(
            "UPDATE breakers SET
                name = $2,
                zone = $3,
                location = $4,
                state = $5,
                lock_key = $6,
                general_breaker = $7,
                last_updated = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Breaker>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.zone)
            .bind(&input.location)
            .bind(input.state.as_str())
            .bind(&input.lock_key)
            .bind(&input.general_breaker)
            .fetch_optional(pool)
            .await
    }

    /// Permanently delete a breaker. Returns `true` if a row was removed.
    ///
    /// History rows pointing at it keep their text; `breaker_id` is nulled
    /// by the foreign key.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM breakers WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Breakers that name `parent_name` as their general breaker.
    pub async fn list_children(
        pool: &PgPool,
        parent_name: &str,
    ) -> Result<Vec<Breaker>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM breakers WHERE general_breaker = $1 {ORDER}");
        sqlx::query_as::<_, Breaker>(&query)
            .bind(parent_name)
            .fetch_all(pool)
            .await
    }

    /// Re-point children of a renamed breaker. Returns the number of rows changed.
    ///
    /// `exclude_id` is the renamed breaker itself, so a self-reference is
    /// left as written by its own update.
    pub async fn rename_parent_refs(
        pool: &PgPool,
        old_name: &str,
        new_name: &str,
        exclude_id: DbId,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE breakers SET general_breaker = $2, last_updated = NOW()
             WHERE general_breaker = $1 AND id <> $3",
        )
        .bind(old_name)
        .bind(new_name)
        .bind(exclude_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// Closed breakers carrying a non-blank lock key, in display order.
    pub async fn list_locked_with_keys(pool: &PgPool) -> Result<Vec<Breaker>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM breakers
             WHERE state = 'Closed' AND lock_key IS NOT NULL AND BTRIM(lock_key) <> ''
             {ORDER}"
        );
        sqlx::query_as::<_, Breaker>(&query).fetch_all(pool).await
    }

    /// The Closed breaker that a resync would assign `key_number` to.
    ///
    /// When several Closed breakers reference the same key, the last one in
    /// display order wins, mirroring resync.
    pub async fn find_closed_holder(
        pool: &PgPool,
        key_number: &str,
    ) -> Result<Option<Breaker>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM breakers
             WHERE state = 'Closed' AND BTRIM(lock_key) = $1
             ORDER BY zone DESC, location DESC, name DESC, id DESC
             LIMIT 1"
        );
        sqlx::query_as::<_, Breaker>(&query)
            .bind(key_number)
            .fetch_optional(pool)
            .await
    }

    /// Distinct zone names, sorted.
    pub async fn distinct_zones(pool: &PgPool) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar::<_, String>("SELECT DISTINCT zone FROM breakers ORDER BY zone")
            .fetch_all(pool)
            .await
    }

    /// Distinct locations, optionally restricted to one zone, sorted.
    pub async fn distinct_locations(
        pool: &PgPool,
        zone: Option<&str>,
    ) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar::<_, String>(
            "SELECT DISTINCT location FROM breakers
             WHERE ($1::TEXT IS NULL OR zone = $1)
             ORDER BY location",
        )
        .bind(zone)
        .fetch_all(pool)
        .await
    }
}
