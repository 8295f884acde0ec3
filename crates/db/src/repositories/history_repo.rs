//! Repository for the append-only `history` table.

use sqlx::PgPool;

use crate::models::history::{CreateHistoryEntry, HistoryEntry};

/// Select list with the breaker name joined in (`h` = history, `b` = breakers).
const JOINED_COLUMNS: &str = "\
    h.id, h.breaker_id, b.name AS breaker_name, h.action, \
    h.user_mode, h.details, h.timestamp";

/// Provides append, list and clear operations for history entries.
///
/// There is deliberately no update method.
pub struct HistoryRepo;

impl HistoryRepo {
    /// Append one entry, returning it with the breaker name resolved.
    pub async fn create(
        pool: &PgPool,
        input: &CreateHistoryEntry,
    ) -> Result<HistoryEntry, sqlx::Error> {
        sqlx::query_as::<_, HistoryEntry>(
            "INSERT INTO history (breaker_id, action, user_mode, details)
             VALUES ($1, $2, $3, $4)
             RETURNING id, breaker_id,
                 (SELECT name FROM breakers WHERE breakers.id = history.breaker_id) AS breaker_name,
                 action, user_mode, details, timestamp",
        )
        .bind(input.breaker_id)
        .bind(&input.action)
        .bind(input.user_mode.as_str())
        .bind(&input.details)
        .fetch_one(pool)
        .await
    }

    /// Entries newest first.
    ///
    /// `limit` of `None` or a non-positive value returns the full log.
    pub async fn list(pool: &PgPool, limit: Option<i64>) -> Result<Vec<HistoryEntry>, sqlx::Error> {
        let limit = limit.filter(|l| *l > 0);
        let query = format!(
            "SELECT {JOINED_COLUMNS}
             FROM history h
             LEFT JOIN breakers b ON b.id = h.breaker_id
             ORDER BY h.timestamp DESC, h.id DESC
             LIMIT $1"
        );
        // `LIMIT NULL` is `LIMIT ALL` in PostgreSQL.
        sqlx::query_as::<_, HistoryEntry>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Remove every entry. Returns the number of rows removed.
    pub async fn clear(pool: &PgPool) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM history").execute(pool).await?;
        Ok(result.rows_affected())
    }
}
