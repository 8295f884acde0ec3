//! Best-effort history writes.

use loto_core::audit::{HistoryText, UserMode};
use loto_core::types::DbId;
use loto_db::models::history::CreateHistoryEntry;
use loto_db::repositories::HistoryRepo;
use loto_db::DbPool;

/// Append one history entry.
///
/// A failed write is logged and swallowed: the mutation it documents has
/// already been committed and stays committed.
pub async fn record(pool: &DbPool, mode: UserMode, breaker_id: Option<DbId>, text: HistoryText) {
    let entry = CreateHistoryEntry {
        breaker_id,
        action: text.action,
        user_mode: mode,
        details: text.details,
    };

    if let Err(e) = HistoryRepo::create(pool, &entry).await {
        tracing::warn!(
            error = %e,
            action = %entry.action,
            breaker_id = ?breaker_id,
            "Failed to write history entry",
        );
    }
}
