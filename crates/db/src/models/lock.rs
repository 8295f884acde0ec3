//! Lock (padlock) entity model and DTOs.

use loto_core::lockout::LockRowView;
use loto_core::types::DbId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A padlock row from the `locks` table.
///
/// `used` and `assigned_to` are written both by direct edits and by breaker
/// reconciliation.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Lock {
    pub id: DbId,
    pub key_number: String,
    pub zone: String,
    pub used: bool,
    /// Name of the breaker holding this lock (free text, not a foreign key).
    pub assigned_to: Option<String>,
    pub remarks: Option<String>,
}

impl Lock {
    pub fn row_view(&self) -> LockRowView<'_> {
        LockRowView {
            key_number: &self.key_number,
            used: self.used,
            assigned_to: self.assigned_to.as_deref(),
        }
    }
}

/// DTO for creating or replacing a lock.
#[derive(Debug, Clone, Deserialize)]
pub struct LockInput {
    pub key_number: String,
    pub zone: String,
    #[serde(default)]
    pub used: bool,
    pub assigned_to: Option<String>,
    pub remarks: Option<String>,
}

impl LockInput {
    /// Trim text fields. A lock that is not in use carries no assignee.
    pub fn normalized(&self) -> Self {
        let assigned_to = if self.used {
            loto_core::breaker::normalize_ref(self.assigned_to.as_deref())
        } else {
            None
        };
        Self {
            key_number: self.key_number.trim().to_string(),
            zone: self.zone.trim().to_string(),
            used: self.used,
            assigned_to,
            remarks: loto_core::breaker::normalize_ref(self.remarks.as_deref()),
        }
    }
}

/// Optional filters for listing locks (`?zone=&used=`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LockFilter {
    pub zone: Option<String>,
    pub used: Option<bool>,
}
