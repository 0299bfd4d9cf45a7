//! Slot key model: depth codes, storage coordinates, canonical keys, and
//! human-readable labels.
//!
//! Coordinates are immutable value types. Identity is the
//! (shelf, column, depth) triple itself; the canonical string key
//! `"<shelf>:<column>:<depth-code>"` is what occupancy sets and collision
//! lookups use for O(1) membership checks.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Depth
// ---------------------------------------------------------------------------

/// Front/back position within a column.
///
/// Persisted as a SMALLINT code: 1 = front, 2 = back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Depth {
    Front,
    Back,
}

impl Depth {
    /// Return the database code (1 = front, 2 = back).
    pub fn code(self) -> i16 {
        match self {
            Self::Front => 1,
            Self::Back => 2,
        }
    }

    /// Parse a database code back into a depth.
    pub fn from_code(code: i16) -> Result<Self, CoreError> {
        match code {
            1 => Ok(Self::Front),
            2 => Ok(Self::Back),
            other => Err(CoreError::Validation(format!(
                "Invalid depth code {other}. Must be 1 (front) or 2 (back)"
            ))),
        }
    }

    /// Human-readable label for display.
    pub fn label(self) -> &'static str {
        match self {
            Self::Front => "Front",
            Self::Back => "Back",
        }
    }

    /// The other depth in the same column.
    pub fn opposite(self) -> Self {
        match self {
            Self::Front => Self::Back,
            Self::Back => Self::Front,
        }
    }
}

// ---------------------------------------------------------------------------
// SlotCoordinate
// ---------------------------------------------------------------------------

/// A (shelf, column, depth) triple identifying one physical storage position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SlotCoordinate {
    /// 1-based shelf number.
    pub shelf: i16,
    /// 1-based column number within the shelf.
    pub column: i16,
    pub depth: Depth,
}

impl SlotCoordinate {
    /// Build a coordinate, rejecting out-of-range shelf/column values.
    pub fn new(shelf: i16, column: i16, depth: Depth) -> Result<Self, CoreError> {
        if shelf < 1 {
            return Err(CoreError::Validation(format!(
                "Shelf must be >= 1, got {shelf}"
            )));
        }
        if column < 1 {
            return Err(CoreError::Validation(format!(
                "Column must be >= 1, got {column}"
            )));
        }
        Ok(Self {
            shelf,
            column,
            depth,
        })
    }

    /// Canonical key `"<shelf>:<column>:<depth-code>"`, unique per coordinate.
    pub fn key(&self) -> String {
        format!("{}:{}:{}", self.shelf, self.column, self.depth.code())
    }

    /// Human-readable label, e.g. `"S3 · C5 · Front"`.
    pub fn label(&self) -> String {
        format!("S{} · C{} · {}", self.shelf, self.column, self.depth.label())
    }

    /// Label for the column alone (no depth), e.g. `"S3 · C5"`.
    pub fn column_label(&self) -> String {
        format!("S{} · C{}", self.shelf, self.column)
    }

    /// The same column position at the given depth.
    pub fn at_depth(&self, depth: Depth) -> Self {
        Self { depth, ..*self }
    }
}
