//! Slot assignment models: where each placed wine sits.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use vinoteca_core::error::CoreError;
use vinoteca_core::ledger::SlotSnapshot;
use vinoteca_core::slot::{Depth, SlotCoordinate};
use vinoteca_core::types::{DbId, Timestamp};

/// A row from the `slot_assignments` table. At most one per wine
/// (`uq_slot_wine`); at most one per exact position (`uq_slot_position`).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SlotAssignment {
    pub id: DbId,
    pub wine_id: DbId,
    pub storage_unit_id: DbId,
    pub shelf: i16,
    pub column_position: i16,
    /// Depth code: 1 = front, 2 = back.
    pub depth: i16,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl SlotAssignment {
    /// The typed coordinate for this row.
    pub fn coordinate(&self) -> Result<SlotCoordinate, CoreError> {
        SlotCoordinate::new(self.shelf, self.column_position, Depth::from_code(self.depth)?)
    }

    /// Snapshot for the rollback ledger.
    pub fn snapshot(&self) -> Result<SlotSnapshot, CoreError> {
        Ok(SlotSnapshot {
            storage_unit_id: self.storage_unit_id,
            coordinate: self.coordinate()?,
        })
    }
}

/// DTO for the upsert write: one wine, one target position.
#[derive(Debug, Clone, Deserialize)]
pub struct PlaceSlotAssignment {
    pub wine_id: DbId,
    pub storage_unit_id: DbId,
    pub shelf: i16,
    pub column_position: i16,
    pub depth: i16,
}

impl PlaceSlotAssignment {
    pub fn new(wine_id: DbId, storage_unit_id: DbId, coord: SlotCoordinate) -> Self {
        Self {
            wine_id,
            storage_unit_id,
            shelf: coord.shelf,
            column_position: coord.column,
            depth: coord.depth.code(),
        }
    }
}
