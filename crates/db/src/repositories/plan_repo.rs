//! Repository for the `plans` table.

use loto_core::types::DbId;
use sqlx::PgPool;

use crate::models::plan::{CreatePlan, Plan};

const COLUMNS: &str = "id, filename, file_path, version, uploaded_at";

pub struct PlanRepo;

impl PlanRepo {
    pub async fn create(pool: &PgPool, input: &CreatePlan) -> Result<Plan, sqlx::Error> {
        let query = format!(
            "INSERT INTO plans (filename, file_path, version)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Plan>(&query)
            .bind(&input.filename)
            .bind(&input.file_path)
            .bind(&input.version)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Plan>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM plans WHERE id = $1");
        sqlx::query_as::<_, Plan>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Most recently uploaded first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Plan>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM plans ORDER BY uploaded_at DESC, id DESC");
        sqlx::query_as::<_, Plan>(&query).fetch_all(pool).await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM plans WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
