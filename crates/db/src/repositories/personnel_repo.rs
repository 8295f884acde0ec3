//! Repository for the `personnel` table.

use loto_core::types::DbId;
use sqlx::PgPool;

use crate::models::personnel::{Personnel, PersonnelInput};

const COLUMNS: &str =
    "id, name, lastname, id_card, company, habilitation, pdf_path, created_at";

/// Provides CRUD operations for personnel records.
pub struct PersonnelRepo;

impl PersonnelRepo {
    /// Insert a new person. `id_card` is unique (`uq_personnel_id_card`).
    pub async fn create(pool: &PgPool, input: &PersonnelInput) -> Result<Personnel, sqlx::Error> {
        let query = format!(
            "INSERT INTO personnel (name, lastname, id_card, company, habilitation, pdf_path)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Personnel>(&query)
            .bind(&input.name)
            .bind(&input.lastname)
            .bind(&input.id_card)
            .bind(&input.company)
            .bind(&input.habilitation)
            .bind(&input.pdf_path)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Personnel>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM personnel WHERE id = $1");
        sqlx::query_as::<_, Personnel>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List everyone ordered by last name, then first name.
    pub async fn list(pool: &PgPool) -> Result<Vec<Personnel>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM personnel ORDER BY lastname, name, id");
        sqlx::query_as::<_, Personnel>(&query).fetch_all(pool).await
    }

    /// Replace every column of a personnel record.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &PersonnelInput,
    ) -> Result<Option<Personnel>, sqlx::Error> {
        let query = format!(
            "UPDATE personnel SET
                name = $2,
                lastname = $3,
                id_card = $4,
                company = $5,
                habilitation = $6,
                pdf_path = $7
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Personnel>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.lastname)
            .bind(&input.id_card)
            .bind(&input.company)
            .bind(&input.habilitation)
            .bind(&input.pdf_path)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM personnel WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*)::BIGINT FROM personnel")
            .fetch_one(pool)
            .await
    }
}
