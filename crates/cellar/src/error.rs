use vinoteca_core::error::CoreError;
use vinoteca_core::types::DbId;

/// Errors from the placement subsystem.
///
/// `SlotOccupied` and `NotPlaced` are the machine-checkable outcomes callers
/// branch on; the API layer maps them to the `SLOT_OCCUPIED` and
/// `NOT_PLACED` error codes.
#[derive(Debug, thiserror::Error)]
pub enum CellarError {
    /// Placement blocked; the message names the slot and why.
    #[error("{0}")]
    SlotOccupied(String),

    /// The wine has no slot assignment to move or remove.
    #[error("Wine {0} is not placed in any slot")]
    NotPlaced(DbId),

    /// Undo requested with an empty ledger.
    #[error("No changes to undo")]
    NothingToUndo,

    /// Ghost transition requested without an active preview.
    #[error("{0}")]
    NoGhost(String),

    /// A domain-level error (validation, missing entity).
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A persistence failure, wrapped with context and propagated.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}
