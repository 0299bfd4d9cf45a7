//! Rollback ledger: bounded, in-memory, per-wine history of placement
//! changes.
//!
//! The ledger is an explicitly owned value (held by the cellar session),
//! never module-level state, so independent sessions and tests cannot
//! cross-contaminate. It is a best-effort safety net, not a durable audit
//! log: entries do not survive a process restart.

use std::collections::HashMap;

use serde::Serialize;

use crate::slot::SlotCoordinate;
use crate::types::{DbId, Timestamp};

/// Default number of entries retained per wine.
pub const DEFAULT_HISTORY_DEPTH: usize = 10;

/// The mutating operation a ledger entry reverses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlacementAction {
    Place,
    Move,
    Remove,
}

/// Where a wine sat before an operation, captured for undo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SlotSnapshot {
    pub storage_unit_id: DbId,
    pub coordinate: SlotCoordinate,
}

/// One reversible change: the action taken and the assignment it replaced
/// (`None` when the wine was unplaced beforehand).
#[derive(Debug, Clone, Serialize)]
pub struct RollbackEntry {
    pub wine_id: DbId,
    pub action: PlacementAction,
    pub previous: Option<SlotSnapshot>,
    pub recorded_at: Timestamp,
}

/// Per-wine stacks of rollback entries, most recent last, bounded to
/// `max_depth` with silent eviction of the oldest entry.
#[derive(Debug, Clone)]
pub struct RollbackLedger {
    stacks: HashMap<DbId, Vec<RollbackEntry>>,
    max_depth: usize,
}

impl Default for RollbackLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl RollbackLedger {
    pub fn new() -> Self {
        Self::with_max_depth(DEFAULT_HISTORY_DEPTH)
    }

    /// A ledger retaining at most `max_depth` entries per wine. A depth of
    /// zero disables recording entirely.
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self {
            stacks: HashMap::new(),
            max_depth,
        }
    }

    /// Push an entry unconditionally, evicting the oldest entry for that
    /// wine once the bound is exceeded.
    pub fn record(&mut self, entry: RollbackEntry) {
        if self.max_depth == 0 {
            return;
        }
        let stack = self.stacks.entry(entry.wine_id).or_default();
        stack.push(entry);
        if stack.len() > self.max_depth {
            stack.remove(0);
        }
    }

    /// Pop the most recent entry for the wine, if any.
    pub fn pop(&mut self, wine_id: DbId) -> Option<RollbackEntry> {
        let entry = self.stacks.get_mut(&wine_id)?.pop();
        if self
            .stacks
            .get(&wine_id)
            .is_some_and(|stack| stack.is_empty())
        {
            self.stacks.remove(&wine_id);
        }
        entry
    }

    /// Most recent entry for the wine without removing it.
    pub fn peek(&self, wine_id: DbId) -> Option<&RollbackEntry> {
        self.stacks.get(&wine_id)?.last()
    }

    /// Number of recorded entries for the wine.
    pub fn depth(&self, wine_id: DbId) -> usize {
        self.stacks.get(&wine_id).map_or(0, Vec::len)
    }

    /// Discard all entries for the wine.
    pub fn clear(&mut self, wine_id: DbId) {
        self.stacks.remove(&wine_id);
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::slot::Depth;

    fn entry(wine_id: DbId, shelf: i16) -> RollbackEntry {
        RollbackEntry {
            wine_id,
            action: PlacementAction::Move,
            previous: Some(SlotSnapshot {
                storage_unit_id: 1,
                coordinate: SlotCoordinate::new(shelf, 1, Depth::Front).unwrap(),
            }),
            recorded_at: Utc::now(),
        }
    }

    #[test]
    fn test_pop_returns_most_recent_first() {
        let mut ledger = RollbackLedger::new();
        ledger.record(entry(1, 1));
        ledger.record(entry(1, 2));

        let popped = ledger.pop(1).unwrap();
        assert_eq!(popped.previous.unwrap().coordinate.shelf, 2);
        let popped = ledger.pop(1).unwrap();
        assert_eq!(popped.previous.unwrap().coordinate.shelf, 1);
        assert!(ledger.pop(1).is_none());
    }

    #[test]
    fn test_bound_evicts_oldest_silently() {
        let mut ledger = RollbackLedger::with_max_depth(3);
        for shelf in 1..=5 {
            ledger.record(entry(1, shelf));
        }

        assert_eq!(ledger.depth(1), 3);
        // Shelves 1 and 2 were evicted; 5, 4, 3 remain, newest first.
        assert_eq!(ledger.pop(1).unwrap().previous.unwrap().coordinate.shelf, 5);
        assert_eq!(ledger.pop(1).unwrap().previous.unwrap().coordinate.shelf, 4);
        assert_eq!(ledger.pop(1).unwrap().previous.unwrap().coordinate.shelf, 3);
        assert!(ledger.pop(1).is_none());
    }

    #[test]
    fn test_stacks_are_independent_per_wine() {
        let mut ledger = RollbackLedger::new();
        ledger.record(entry(1, 1));
        ledger.record(entry(2, 9));

        assert_eq!(ledger.depth(1), 1);
        assert_eq!(ledger.depth(2), 1);
        assert_eq!(ledger.pop(2).unwrap().previous.unwrap().coordinate.shelf, 9);
        assert_eq!(ledger.depth(1), 1);
    }

    #[test]
    fn test_peek_does_not_remove() {
        let mut ledger = RollbackLedger::new();
        ledger.record(entry(1, 4));

        assert_eq!(
            ledger.peek(1).unwrap().previous.unwrap().coordinate.shelf,
            4
        );
        assert_eq!(ledger.depth(1), 1);
    }

    #[test]
    fn test_zero_depth_records_nothing() {
        let mut ledger = RollbackLedger::with_max_depth(0);
        ledger.record(entry(1, 1));
        assert_eq!(ledger.depth(1), 0);
        assert!(ledger.pop(1).is_none());
    }

    #[test]
    fn test_independent_ledgers_do_not_share_state() {
        let mut a = RollbackLedger::new();
        let mut b = RollbackLedger::new();
        a.record(entry(1, 1));

        assert_eq!(a.depth(1), 1);
        assert_eq!(b.depth(1), 0);
        assert!(b.pop(1).is_none());
    }
}
