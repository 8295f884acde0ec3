//! Repository for the single-row `app_settings` table.

use sqlx::PgPool;

use crate::models::settings::{AppSettings, UpdateAppSettings};

const COLUMNS: &str = "app_name, app_version, access_code, updated_at";

pub struct SettingsRepo;

impl SettingsRepo {
    /// Load the settings row seeded by the migrations.
    pub async fn get(pool: &PgPool) -> Result<AppSettings, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM app_settings WHERE id = 1");
        sqlx::query_as::<_, AppSettings>(&query)
            .fetch_one(pool)
            .await
    }

    /// Update settings. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        input: &UpdateAppSettings,
    ) -> Result<AppSettings, sqlx::Error> {
        let query = format!(
            "UPDATE app_settings SET
                app_name = COALESCE($1, app_name),
                app_version = COALESCE($2, app_version),
                access_code = COALESCE($3, access_code),
                updated_at = NOW()
             WHERE id = 1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AppSettings>(&query)
            .bind(&input.app_name)
            .bind(&input.app_version)
            .bind(&input.access_code)
            .fetch_one(pool)
            .await
    }
}
