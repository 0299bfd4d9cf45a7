//! Ghost-preview state machine: the pending, unconfirmed placement a user
//! sees while deciding where a bottle goes.
//!
//! Modeled as an explicit finite-state machine. Transition functions are
//! pure: they consume the current state and return the next state plus a
//! list of effects for the caller (the cellar session) to perform. Nothing
//! here touches persistence, which is what makes the transition logic
//! unit-testable without a UI or database harness.

use serde::Serialize;

use crate::slot::SlotCoordinate;
use crate::types::DbId;

/// At most one ghost preview exists at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum GhostState {
    /// No pending placement.
    Idle,
    /// The user has picked a target slot but nothing is persisted yet.
    Previewing {
        wine_id: DbId,
        storage_unit_id: DbId,
        target: SlotCoordinate,
    },
}

impl GhostState {
    pub fn is_previewing(&self) -> bool {
        matches!(self, Self::Previewing { .. })
    }
}

/// Side effects a transition asks its interpreter to perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GhostEffect {
    /// Persist the previewed placement (place or move, the interpreter's
    /// call depending on whether the wine already has an assignment).
    Commit {
        wine_id: DbId,
        storage_unit_id: DbId,
        target: SlotCoordinate,
    },
    /// Rebuild the occupancy projection from persisted assignments.
    RefreshOccupancy,
    /// Report a user-visible problem with the requested transition.
    SurfaceError(String),
}

/// Result of a transition: the state to adopt plus effects to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub next: GhostState,
    pub effects: Vec<GhostEffect>,
}

impl Transition {
    fn to(next: GhostState) -> Self {
        Self {
            next,
            effects: Vec::new(),
        }
    }

    fn with_effect(next: GhostState, effect: GhostEffect) -> Self {
        Self {
            next,
            effects: vec![effect],
        }
    }
}

/// Begin previewing a target slot for a wine. Starting while another
/// preview is active replaces it: only one ghost ever exists.
pub fn start(
    _state: GhostState,
    wine_id: DbId,
    storage_unit_id: DbId,
    target: SlotCoordinate,
) -> Transition {
    Transition::to(GhostState::Previewing {
        wine_id,
        storage_unit_id,
        target,
    })
}

/// Adjust the target slot before confirming. A no-op when idle.
pub fn retarget(state: GhostState, new_target: SlotCoordinate) -> Transition {
    match state {
        GhostState::Previewing {
            wine_id,
            storage_unit_id,
            ..
        } => Transition::to(GhostState::Previewing {
            wine_id,
            storage_unit_id,
            target: new_target,
        }),
        GhostState::Idle => Transition::with_effect(
            GhostState::Idle,
            GhostEffect::SurfaceError("No ghost preview to update".to_string()),
        ),
    }
}

/// Discard the preview. No persistence side effects.
pub fn cancel(_state: GhostState) -> Transition {
    Transition::to(GhostState::Idle)
}

/// Commit the preview: emits the commit and a follow-up occupancy refresh.
/// Confirming while idle surfaces an error instead.
pub fn confirm(state: GhostState) -> Transition {
    match state {
        GhostState::Previewing {
            wine_id,
            storage_unit_id,
            target,
        } => Transition {
            next: GhostState::Idle,
            effects: vec![
                GhostEffect::Commit {
                    wine_id,
                    storage_unit_id,
                    target,
                },
                GhostEffect::RefreshOccupancy,
            ],
        },
        GhostState::Idle => Transition::with_effect(
            GhostState::Idle,
            GhostEffect::SurfaceError("No ghost preview to confirm".to_string()),
        ),
    }
}
