//! Occupancy projection: the derived set of occupied slot keys.
//!
//! Always rebuilt wholesale from the full assignment list after a mutation,
//! never patched incrementally. A home cellar holds at most a few hundred
//! bottles, so the O(n) recompute is cheap and cannot drift from the
//! persisted truth.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::slot::{Depth, SlotCoordinate};

/// Derived view over all currently occupied coordinates of one storage unit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OccupancyProjection {
    /// Canonical keys of every occupied slot.
    pub keys: BTreeSet<String>,
    /// Number of occupied front-depth slots.
    pub front_count: usize,
    /// Number of occupied back-depth slots.
    pub back_count: usize,
}

impl OccupancyProjection {
    /// Project the full coordinate list into an occupancy set.
    pub fn from_coordinates<'a, I>(coords: I) -> Self
    where
        I: IntoIterator<Item = &'a SlotCoordinate>,
    {
        let mut projection = Self::default();
        for coord in coords {
            projection.keys.insert(coord.key());
            match coord.depth {
                Depth::Front => projection.front_count += 1,
                Depth::Back => projection.back_count += 1,
            }
        }
        projection
    }

    /// Whether the exact slot is occupied.
    pub fn is_occupied(&self, coord: &SlotCoordinate) -> bool {
        self.keys.contains(&coord.key())
    }

    /// Whether either depth of the coordinate's column is occupied.
    pub fn is_column_occupied(&self, coord: &SlotCoordinate) -> bool {
        self.is_occupied(coord) || self.is_occupied(&coord.at_depth(coord.depth.opposite()))
    }

    /// Total number of occupied slots.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}
