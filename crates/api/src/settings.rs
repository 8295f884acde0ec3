//! In-memory copy of the `app_settings` row.
//!
//! Loaded once at startup and shared by every request. The only write path
//! is [`SettingsStore::update`], which persists first and swaps the cached
//! copy afterwards, so a failed write leaves the cache untouched.

use std::sync::Arc;

use loto_core::access::validate_access_code;
use loto_db::models::settings::{AppSettings, UpdateAppSettings};
use loto_db::repositories::SettingsRepo;
use loto_db::DbPool;
use tokio::sync::RwLock;

use crate::error::AppResult;

#[derive(Clone)]
pub struct SettingsStore {
    inner: Arc<RwLock<AppSettings>>,
}

impl SettingsStore {
    /// Read the settings row into a new store.
    pub async fn load(pool: &DbPool) -> Result<Self, sqlx::Error> {
        let settings = SettingsRepo::get(pool).await?;
        Ok(Self::from_settings(settings))
    }

    pub fn from_settings(settings: AppSettings) -> Self {
        Self {
            inner: Arc::new(RwLock::new(settings)),
        }
    }

    /// A copy of the current settings.
    pub async fn snapshot(&self) -> AppSettings {
        self.inner.read().await.clone()
    }

    /// The code that switches a request into Editor mode.
    pub async fn access_code(&self) -> String {
        self.inner.read().await.access_code.clone()
    }

    /// Persist `input` and refresh the cached copy.
    pub async fn update(&self, pool: &DbPool, input: &UpdateAppSettings) -> AppResult<AppSettings> {
        if let Some(code) = input.access_code.as_deref() {
            validate_access_code(code)?;
        }
        for (field, value) in [
            ("app_name", input.app_name.as_deref()),
            ("app_version", input.app_version.as_deref()),
        ] {
            if let Some(v) = value {
                loto_core::error::require_text(field, v)?;
            }
        }

        // Guard held across the write: one settings update at a time.
        let mut cached = self.inner.write().await;
        let saved = SettingsRepo::update(pool, input).await?;
        *cached = saved.clone();

        tracing::info!(
            app_name = %saved.app_name,
            app_version = %saved.app_version,
            access_code_changed = input.access_code.is_some(),
            "Application settings updated",
        );
        Ok(saved)
    }
}
