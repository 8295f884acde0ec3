//! Application settings model (single-row `app_settings` table).

use loto_core::types::Timestamp;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AppSettings {
    pub app_name: String,
    pub app_version: String,
    #[serde(skip_serializing)]
    pub access_code: String,
    pub updated_at: Timestamp,
}

/// DTO for updating settings. Only non-`None` fields are applied.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateAppSettings {
    pub app_name: Option<String>,
    pub app_version: Option<String>,
    pub access_code: Option<String>,
}
