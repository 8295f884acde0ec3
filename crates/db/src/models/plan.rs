//! Electrical plan entity model and DTOs.

use loto_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A plan document record. Only metadata; file bytes are stored elsewhere.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Plan {
    pub id: DbId,
    pub filename: String,
    pub file_path: String,
    pub version: Option<String>,
    pub uploaded_at: Timestamp,
}

/// DTO for registering an uploaded plan.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePlan {
    pub filename: String,
    pub file_path: String,
    pub version: Option<String>,
}
