//! Repository for the `wines` table.

use sqlx::PgPool;
use vinoteca_core::types::DbId;

use crate::models::wine::{CreateWine, UpdateWine, Wine};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, producer, vintage, region, grape_variety, notes, \
    rating, drunk_at, enrichment, created_at, updated_at";

/// Provides CRUD operations for the wine catalog.
pub struct WineRepo;

impl WineRepo {
    /// Catalog a new bottle.
    pub async fn create(pool: &PgPool, input: &CreateWine) -> Result<Wine, sqlx::Error> {
        let query = format!(
            "INSERT INTO wines (name, producer, vintage, region, grape_variety, notes, rating)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Wine>(&query)
            .bind(&input.name)
            .bind(&input.producer)
            .bind(input.vintage)
            .bind(&input.region)
            .bind(&input.grape_variety)
            .bind(&input.notes)
            .bind(input.rating)
            .fetch_one(pool)
            .await
    }

    /// Find a wine by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Wine>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM wines WHERE id = $1");
        sqlx::query_as::<_, Wine>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all wines, newest first. `drunk` filters to drunk (`true`) or
    /// still-cellared (`false`) bottles when set.
    pub async fn list(pool: &PgPool, drunk: Option<bool>) -> Result<Vec<Wine>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM wines
             WHERE $1::boolean IS NULL OR (drunk_at IS NOT NULL) = $1
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Wine>(&query)
            .bind(drunk)
            .fetch_all(pool)
            .await
    }

    /// Partially update a wine. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateWine,
    ) -> Result<Option<Wine>, sqlx::Error> {
        let query = format!(
            "UPDATE wines SET
                name = COALESCE($2, name),
                producer = COALESCE($3, producer),
                vintage = COALESCE($4, vintage),
                region = COALESCE($5, region),
                grape_variety = COALESCE($6, grape_variety),
                notes = COALESCE($7, notes),
                rating = COALESCE($8, rating),
                updated_at = now()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Wine>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.producer)
            .bind(input.vintage)
            .bind(&input.region)
            .bind(&input.grape_variety)
            .bind(&input.notes)
            .bind(input.rating)
            .fetch_optional(pool)
            .await
    }

    /// Mark a wine drunk (`drunk = true`) or back in the cellar
    /// (`drunk = false`).
    pub async fn set_drunk(
        pool: &PgPool,
        id: DbId,
        drunk: bool,
    ) -> Result<Option<Wine>, sqlx::Error> {
        let query = format!(
            "UPDATE wines SET
                drunk_at = CASE WHEN $2 THEN now() ELSE NULL END,
                updated_at = now()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Wine>(&query)
            .bind(id)
            .bind(drunk)
            .fetch_optional(pool)
            .await
    }

    /// Overwrite the enrichment record wholesale.
    pub async fn set_enrichment(
        pool: &PgPool,
        id: DbId,
        enrichment: &serde_json::Value,
    ) -> Result<Option<Wine>, sqlx::Error> {
        let query = format!(
            "UPDATE wines SET enrichment = $2, updated_at = now()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Wine>(&query)
            .bind(id)
            .bind(enrichment)
            .fetch_optional(pool)
            .await
    }

    /// Delete a wine. Returns `true` if a row was deleted; the slot
    /// assignment, if any, cascades.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM wines WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
