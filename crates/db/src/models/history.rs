//! History (audit trail) models.
//!
//! Entries are immutable once created (no update DTO).

use loto_core::audit::UserMode;
use loto_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A history row joined with the current name of its breaker.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct HistoryEntry {
    pub id: DbId,
    /// `NULL` when the entry is not about a breaker or the breaker was deleted.
    pub breaker_id: Option<DbId>,
    pub breaker_name: Option<String>,
    pub action: String,
    #[sqlx(try_from = "String")]
    pub user_mode: UserMode,
    pub details: Option<String>,
    pub timestamp: Timestamp,
}

/// DTO for appending a history entry.
#[derive(Debug, Clone)]
pub struct CreateHistoryEntry {
    pub breaker_id: Option<DbId>,
    pub action: String,
    pub user_mode: UserMode,
    pub details: Option<String>,
}

/// Request body for a manually recorded entry. The user mode comes from the
/// caller's session, never from the body.
#[derive(Debug, Clone, Deserialize)]
pub struct HistoryNote {
    pub breaker_id: Option<DbId>,
    pub action: String,
    pub details: Option<String>,
}
