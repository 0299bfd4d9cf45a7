//! Undo: replay the most recent ledger entry backwards through the forward
//! command layer.
//!
//! Reusing place/relocate/remove means an undo obeys the same collision
//! rules as any other operation -- undoing into a slot somebody else took in
//! the meantime fails with `SlotOccupied`, surfaced to the caller. The
//! popped entry stays popped either way; a failed undo is not retried.

use sqlx::PgPool;
use vinoteca_core::error::CoreError;
use vinoteca_core::ledger::{PlacementAction, RollbackLedger};
use vinoteca_core::types::DbId;
use vinoteca_db::models::slot::SlotAssignment;

use crate::commands;
use crate::error::CellarError;

/// What an undo did.
#[derive(Debug, serde::Serialize)]
pub struct UndoOutcome {
    /// The action that was reversed.
    pub undone: PlacementAction,
    /// The wine's assignment after the undo (`None` when the undo removed
    /// it from the grid).
    pub restored: Option<SlotAssignment>,
}

/// Reverse the most recent placement change for a wine.
pub async fn undo_last(
    pool: &PgPool,
    ledger: &mut RollbackLedger,
    wine_id: DbId,
) -> Result<UndoOutcome, CellarError> {
    let entry = ledger.pop(wine_id).ok_or(CellarError::NothingToUndo)?;

    let restored = match (entry.action, entry.previous) {
        // The wine had a slot before; put it back there.
        (PlacementAction::Place | PlacementAction::Move, Some(prev)) => Some(
            commands::relocate(pool, ledger, wine_id, prev.storage_unit_id, prev.coordinate)
                .await?,
        ),
        // The wine was unplaced before; take it back off the grid.
        (PlacementAction::Place | PlacementAction::Move, None) => {
            commands::remove(pool, ledger, wine_id).await?;
            None
        }
        (PlacementAction::Remove, Some(prev)) => Some(
            commands::place(pool, ledger, wine_id, prev.storage_unit_id, prev.coordinate).await?,
        ),
        (PlacementAction::Remove, None) => {
            // Remove entries always capture the deleted assignment.
            return Err(CellarError::Core(CoreError::Internal(
                "Remove ledger entry without a prior assignment".to_string(),
            )));
        }
    };

    tracing::info!(wine_id, undone = ?entry.action, "Placement change undone");
    Ok(UndoOutcome {
        undone: entry.action,
        restored,
    })
}
