//! Personnel entity model and DTOs.

use loto_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A person certified to work on the installation.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Personnel {
    pub id: DbId,
    pub name: String,
    pub lastname: String,
    pub id_card: String,
    pub company: Option<String>,
    /// Electrical qualification level, free text.
    pub habilitation: Option<String>,
    /// Stored certificate path; the file itself lives outside this service.
    pub pdf_path: Option<String>,
    pub created_at: Timestamp,
}

/// DTO for creating or replacing a personnel record.
#[derive(Debug, Clone, Deserialize)]
pub struct PersonnelInput {
    pub name: String,
    pub lastname: String,
    pub id_card: String,
    pub company: Option<String>,
    pub habilitation: Option<String>,
    pub pdf_path: Option<String>,
}
