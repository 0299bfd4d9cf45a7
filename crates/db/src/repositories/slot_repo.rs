//! Repository for the `slot_assignments` table.
//!
//! The write path is a single upsert keyed by `wine_id`: placing an
//! already-placed wine relocates it in one statement, never
//! remove-then-insert, so there is no window where a wine holds two slots
//! or none.

use sqlx::PgPool;
use vinoteca_core::types::DbId;

use crate::models::slot::{PlaceSlotAssignment, SlotAssignment};

const COLUMNS: &str =
    "id, wine_id, storage_unit_id, shelf, column_position, depth, created_at, updated_at";

/// Provides lookups and the upsert/delete write path for slot assignments.
pub struct SlotRepo;

impl SlotRepo {
    /// The wine's current assignment, if placed.
    pub async fn find_by_wine_id(
        pool: &PgPool,
        wine_id: DbId,
    ) -> Result<Option<SlotAssignment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM slot_assignments WHERE wine_id = $1");
        sqlx::query_as::<_, SlotAssignment>(&query)
            .bind(wine_id)
            .fetch_optional(pool)
            .await
    }

    /// The assignment at an exact (unit, shelf, column, depth), excluding
    /// the given wine so re-placing a wine never sees itself.
    pub async fn find_at_slot(
        pool: &PgPool,
        storage_unit_id: DbId,
        shelf: i16,
        column_position: i16,
        depth: i16,
        exclude_wine_id: DbId,
    ) -> Result<Option<SlotAssignment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM slot_assignments
             WHERE storage_unit_id = $1 AND shelf = $2 AND column_position = $3
               AND depth = $4 AND wine_id <> $5"
        );
        sqlx::query_as::<_, SlotAssignment>(&query)
            .bind(storage_unit_id)
            .bind(shelf)
            .bind(column_position)
            .bind(depth)
            .bind(exclude_wine_id)
            .fetch_optional(pool)
            .await
    }

    /// All assignments in a column regardless of depth, excluding the given
    /// wine. Used by the stacking-disabled collision rule.
    pub async fn find_in_column(
        pool: &PgPool,
        storage_unit_id: DbId,
        shelf: i16,
        column_position: i16,
        exclude_wine_id: DbId,
    ) -> Result<Vec<SlotAssignment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM slot_assignments
             WHERE storage_unit_id = $1 AND shelf = $2 AND column_position = $3
               AND wine_id <> $4
             ORDER BY depth"
        );
        sqlx::query_as::<_, SlotAssignment>(&query)
            .bind(storage_unit_id)
            .bind(shelf)
            .bind(column_position)
            .bind(exclude_wine_id)
            .fetch_all(pool)
            .await
    }

    /// All assignments in a storage unit, shelf-major order.
    pub async fn list_for_unit(
        pool: &PgPool,
        storage_unit_id: DbId,
    ) -> Result<Vec<SlotAssignment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM slot_assignments
             WHERE storage_unit_id = $1
             ORDER BY shelf, column_position, depth"
        );
        sqlx::query_as::<_, SlotAssignment>(&query)
            .bind(storage_unit_id)
            .fetch_all(pool)
            .await
    }

    /// Place or relocate a wine in one statement. `uq_slot_wine` is the
    /// conflict target; `uq_slot_position` remains the backstop against a
    /// concurrent write into the same position.
    pub async fn upsert(
        pool: &PgPool,
        input: &PlaceSlotAssignment,
    ) -> Result<SlotAssignment, sqlx::Error> {
        let query = format!(
            "INSERT INTO slot_assignments (wine_id, storage_unit_id, shelf, column_position, depth)
             VALUES ($1, $2, $3, $4, $5)
             ON CONFLICT (wine_id) DO UPDATE SET
                storage_unit_id = EXCLUDED.storage_unit_id,
                shelf = EXCLUDED.shelf,
                column_position = EXCLUDED.column_position,
                depth = EXCLUDED.depth,
                updated_at = now()
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SlotAssignment>(&query)
            .bind(input.wine_id)
            .bind(input.storage_unit_id)
            .bind(input.shelf)
            .bind(input.column_position)
            .bind(input.depth)
            .fetch_one(pool)
            .await
    }

    /// Remove a wine from its slot. Returns `true` if a row was deleted.
    pub async fn delete_by_wine_id(pool: &PgPool, wine_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM slot_assignments WHERE wine_id = $1")
            .bind(wine_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
