//! Session-scoped placement context.
//!
//! One `CellarSession` per interactive session owns the rollback ledger,
//! the ghost preview, and the occupancy projection -- explicit state passed
//! by reference, so independent sessions (and tests) never share anything.
//!
//! The session is also the interpreter for ghost-transition effects: the
//! state machine in `vinoteca_core::ghost` stays pure, and the session
//! turns its `Commit` / `RefreshOccupancy` effects into repository calls.

use sqlx::PgPool;
use vinoteca_core::ghost::{self, GhostEffect, GhostState};
use vinoteca_core::ledger::RollbackLedger;
use vinoteca_core::occupancy::OccupancyProjection;
use vinoteca_core::slot::SlotCoordinate;
use vinoteca_core::types::DbId;
use vinoteca_db::models::slot::SlotAssignment;
use vinoteca_db::repositories::SlotRepo;

use crate::error::CellarError;
use crate::undo::{self, UndoOutcome};
use crate::commands;

/// Client-side placement state for one session.
#[derive(Debug)]
pub struct CellarSession {
    ledger: RollbackLedger,
    ghost: GhostState,
    occupancy: OccupancyProjection,
    /// The storage unit the projection was last built from.
    active_unit: Option<DbId>,
}

impl Default for CellarSession {
    fn default() -> Self {
        Self::new()
    }
}

impl CellarSession {
    pub fn new() -> Self {
        Self {
            ledger: RollbackLedger::new(),
            ghost: GhostState::Idle,
            occupancy: OccupancyProjection::default(),
            active_unit: None,
        }
    }

    /// A session whose ledger keeps `depth` entries per wine.
    pub fn with_history_depth(depth: usize) -> Self {
        Self {
            ledger: RollbackLedger::with_max_depth(depth),
            ..Self::new()
        }
    }

    pub fn ghost(&self) -> &GhostState {
        &self.ghost
    }

    pub fn ledger(&self) -> &RollbackLedger {
        &self.ledger
    }

    pub fn occupancy(&self) -> &OccupancyProjection {
        &self.occupancy
    }

    // -----------------------------------------------------------------------
    // Occupancy
    // -----------------------------------------------------------------------

    /// Rebuild the projection from the unit's full assignment list.
    pub async fn refresh_occupancy(
        &mut self,
        pool: &PgPool,
        storage_unit_id: DbId,
    ) -> Result<&OccupancyProjection, CellarError> {
        let rows = SlotRepo::list_for_unit(pool, storage_unit_id).await?;
        let coords = rows
            .iter()
            .map(SlotAssignment::coordinate)
            .collect::<Result<Vec<_>, _>>()?;
        self.occupancy = OccupancyProjection::from_coordinates(&coords);
        self.active_unit = Some(storage_unit_id);
        Ok(&self.occupancy)
    }

    /// Rebuild the projection against the unit a write just touched, making
    /// it the active unit. Refresh failures are logged, never allowed to
    /// mask the write result.
    async fn refresh_after_mutation(&mut self, pool: &PgPool, storage_unit_id: DbId) {
        if let Err(err) = self.refresh_occupancy(pool, storage_unit_id).await {
            tracing::error!(error = %err, storage_unit_id, "Occupancy refresh failed");
        }
    }

    // -----------------------------------------------------------------------
    // Placement commands
    // -----------------------------------------------------------------------

    pub async fn place(
        &mut self,
        pool: &PgPool,
        wine_id: DbId,
        storage_unit_id: DbId,
        coord: SlotCoordinate,
    ) -> Result<SlotAssignment, CellarError> {
        let placed = commands::place(pool, &mut self.ledger, wine_id, storage_unit_id, coord).await?;
        self.refresh_after_mutation(pool, storage_unit_id).await;
        Ok(placed)
    }

    pub async fn relocate(
        &mut self,
        pool: &PgPool,
        wine_id: DbId,
        storage_unit_id: DbId,
        to: SlotCoordinate,
    ) -> Result<SlotAssignment, CellarError> {
        let placed = commands::relocate(pool, &mut self.ledger, wine_id, storage_unit_id, to).await?;
        self.refresh_after_mutation(pool, storage_unit_id).await;
        Ok(placed)
    }

    pub async fn remove(
        &mut self,
        pool: &PgPool,
        wine_id: DbId,
    ) -> Result<SlotAssignment, CellarError> {
        let removed = commands::remove(pool, &mut self.ledger, wine_id).await?;
        self.refresh_after_mutation(pool, removed.storage_unit_id).await;
        Ok(removed)
    }

    pub async fn undo_last(
        &mut self,
        pool: &PgPool,
        wine_id: DbId,
    ) -> Result<UndoOutcome, CellarError> {
        let outcome = undo::undo_last(pool, &mut self.ledger, wine_id).await?;
        if let Some(unit) = outcome
            .restored
            .as_ref()
            .map(|a| a.storage_unit_id)
            .or(self.active_unit)
        {
            self.refresh_after_mutation(pool, unit).await;
        }
        Ok(outcome)
    }

    // -----------------------------------------------------------------------
    // Ghost preview
    // -----------------------------------------------------------------------

    /// Begin (or replace) a preview. Pure state change, nothing persisted.
    pub fn start_ghost(&mut self, wine_id: DbId, storage_unit_id: DbId, target: SlotCoordinate) {
        self.ghost = ghost::start(self.ghost, wine_id, storage_unit_id, target).next;
    }

    /// Adjust the previewed target.
    pub fn retarget_ghost(&mut self, target: SlotCoordinate) -> Result<(), CellarError> {
        let transition = ghost::retarget(self.ghost, target);
        if let Some(message) = surfaced_error(&transition.effects) {
            return Err(CellarError::NoGhost(message));
        }
        self.ghost = transition.next;
        Ok(())
    }

    /// Discard the preview. No side effects.
    pub fn cancel_ghost(&mut self) {
        self.ghost = ghost::cancel(self.ghost).next;
    }

    /// Commit the preview: place or move depending on whether the wine is
    /// already assigned. On failure the ghost stays in Previewing so the
    /// user can retarget, and the error is surfaced.
    pub async fn confirm_ghost(&mut self, pool: &PgPool) -> Result<SlotAssignment, CellarError> {
        let transition = ghost::confirm(self.ghost);
        if let Some(message) = surfaced_error(&transition.effects) {
            return Err(CellarError::NoGhost(message));
        }

        let mut placed = None;
        for effect in &transition.effects {
            match effect {
                GhostEffect::Commit {
                    wine_id,
                    storage_unit_id,
                    target,
                } => {
                    let already_placed = SlotRepo::find_by_wine_id(pool, *wine_id).await?.is_some();
                    let result = if already_placed {
                        commands::relocate(pool, &mut self.ledger, *wine_id, *storage_unit_id, *target).await
                    } else {
                        commands::place(pool, &mut self.ledger, *wine_id, *storage_unit_id, *target).await
                    };
                    // Ghost remains previewing on failure.
                    placed = Some(result?);
                }
                GhostEffect::RefreshOccupancy => {
                    if let Some(assignment) = &placed {
                        self.refresh_after_mutation(pool, assignment.storage_unit_id).await;
                    }
                }
                GhostEffect::SurfaceError(_) => unreachable!("checked above"),
            }
        }

        self.ghost = transition.next;
        placed.ok_or_else(|| {
            CellarError::NoGhost("No ghost preview to confirm".to_string())
        })
    }
}

fn surfaced_error(effects: &[GhostEffect]) -> Option<String> {
    effects.iter().find_map(|effect| match effect {
        GhostEffect::SurfaceError(message) => Some(message.clone()),
        _ => None,
    })
}
