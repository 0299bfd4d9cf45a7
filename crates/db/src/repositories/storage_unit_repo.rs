//! Repository for the `storage_units` table.

use sqlx::PgPool;
use vinoteca_core::types::DbId;

use crate::models::storage_unit::{CreateStorageUnit, StorageUnit, UpdateStorageUnit};

const COLUMNS: &str =
    "id, name, shelf_count, column_count, stacking_enabled, created_at, updated_at";

/// Provides CRUD operations for storage units.
pub struct StorageUnitRepo;

impl StorageUnitRepo {
    /// Insert a new storage unit.
    pub async fn create(
        pool: &PgPool,
        input: &CreateStorageUnit,
    ) -> Result<StorageUnit, sqlx::Error> {
        let query = format!(
            "INSERT INTO storage_units (name, shelf_count, column_count, stacking_enabled)
             VALUES ($1, $2, $3, COALESCE($4, false))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, StorageUnit>(&query)
            .bind(&input.name)
            .bind(input.shelf_count)
            .bind(input.column_count)
            .bind(input.stacking_enabled)
            .fetch_one(pool)
            .await
    }

    /// Find a storage unit by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<StorageUnit>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM storage_units WHERE id = $1");
        sqlx::query_as::<_, StorageUnit>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all storage units by name.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<StorageUnit>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM storage_units ORDER BY name, id");
        sqlx::query_as::<_, StorageUnit>(&query)
            .fetch_all(pool)
            .await
    }

    /// Partially update a storage unit (including toggling
    /// `stacking_enabled`). Only non-`None` fields are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateStorageUnit,
    ) -> Result<Option<StorageUnit>, sqlx::Error> {
        let query = format!(
            "UPDATE storage_units SET
                name = COALESCE($2, name),
                shelf_count = COALESCE($3, shelf_count),
                column_count = COALESCE($4, column_count),
                stacking_enabled = COALESCE($5, stacking_enabled),
                updated_at = now()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, StorageUnit>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(input.shelf_count)
            .bind(input.column_count)
            .bind(input.stacking_enabled)
            .fetch_optional(pool)
            .await
    }

    /// Delete a storage unit. Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM storage_units WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
