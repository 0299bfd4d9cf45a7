//! Storage unit models and DTOs: the physical grid slot coordinates live in.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use vinoteca_core::error::CoreError;
use vinoteca_core::slot::SlotCoordinate;
use vinoteca_core::types::{DbId, Timestamp};

/// A row from the `storage_units` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct StorageUnit {
    pub id: DbId,
    pub name: String,
    pub shelf_count: i16,
    pub column_count: i16,
    /// When true, both depths of a column may be occupied independently.
    pub stacking_enabled: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl StorageUnit {
    /// Reject coordinates outside this unit's grid.
    pub fn validate_coordinate(&self, coord: &SlotCoordinate) -> Result<(), CoreError> {
        if coord.shelf > self.shelf_count {
            return Err(CoreError::Validation(format!(
                "Shelf {} is out of range for '{}' ({} shelves)",
                coord.shelf, self.name, self.shelf_count
            )));
        }
        if coord.column > self.column_count {
            return Err(CoreError::Validation(format!(
                "Column {} is out of range for '{}' ({} columns)",
                coord.column, self.name, self.column_count
            )));
        }
        Ok(())
    }
}

/// DTO for creating a storage unit.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateStorageUnit {
    pub name: String,
    pub shelf_count: i16,
    pub column_count: i16,
    pub stacking_enabled: Option<bool>,
}

/// DTO for partially updating a storage unit (including toggling stacking).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateStorageUnit {
    pub name: Option<String>,
    pub shelf_count: Option<i16>,
    pub column_count: Option<i16>,
    pub stacking_enabled: Option<bool>,
}

/// Validate grid dimensions on create.
pub fn validate_dimensions(shelf_count: i16, column_count: i16) -> Result<(), CoreError> {
    if shelf_count < 1 {
        return Err(CoreError::Validation(format!(
            "Shelf count must be >= 1, got {shelf_count}"
        )));
    }
    if column_count < 1 {
        return Err(CoreError::Validation(format!(
            "Column count must be >= 1, got {column_count}"
        )));
    }
    Ok(())
}
