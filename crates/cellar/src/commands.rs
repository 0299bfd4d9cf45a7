//! Placement command layer: place, relocate (move), remove.
//!
//! Each command runs the advisory collision check, captures the wine's
//! current assignment for rollback, performs exactly one write, and records
//! a ledger entry only after that write succeeds. A failed check or a
//! failed write leaves state as if the call never happened.

use chrono::Utc;
use sqlx::PgPool;
use vinoteca_core::error::CoreError;
use vinoteca_core::ledger::{PlacementAction, RollbackEntry, RollbackLedger};
use vinoteca_core::slot::SlotCoordinate;
use vinoteca_core::types::DbId;
use vinoteca_db::models::slot::{PlaceSlotAssignment, SlotAssignment};
use vinoteca_db::models::storage_unit::StorageUnit;
use vinoteca_db::repositories::{SlotRepo, StorageUnitRepo, WineRepo};

use crate::collision;
use crate::error::CellarError;

/// Place a wine at a coordinate. A wine that already has a slot is
/// relocated in the same single upsert.
pub async fn place(
    pool: &PgPool,
    ledger: &mut RollbackLedger,
    wine_id: DbId,
    storage_unit_id: DbId,
    coord: SlotCoordinate,
) -> Result<SlotAssignment, CellarError> {
    upsert_checked(pool, ledger, PlacementAction::Place, wine_id, storage_unit_id, coord).await
}

/// Move a wine to a new coordinate. Collision-checked against the target
/// only; the wine's own prior slot never blocks it. A single upsert, so the
/// wine is never in two slots at once.
pub async fn relocate(
    pool: &PgPool,
    ledger: &mut RollbackLedger,
    wine_id: DbId,
    storage_unit_id: DbId,
    to: SlotCoordinate,
) -> Result<SlotAssignment, CellarError> {
    upsert_checked(pool, ledger, PlacementAction::Move, wine_id, storage_unit_id, to).await
}

/// Remove a wine from its slot.
pub async fn remove(
    pool: &PgPool,
    ledger: &mut RollbackLedger,
    wine_id: DbId,
) -> Result<SlotAssignment, CellarError> {
    let prior = SlotRepo::find_by_wine_id(pool, wine_id)
        .await?
        .ok_or(CellarError::NotPlaced(wine_id))?;

    let deleted = SlotRepo::delete_by_wine_id(pool, wine_id).await?;
    if !deleted {
        return Err(CellarError::NotPlaced(wine_id));
    }

    ledger.record(RollbackEntry {
        wine_id,
        action: PlacementAction::Remove,
        previous: Some(prior.snapshot()?),
        recorded_at: Utc::now(),
    });

    tracing::info!(wine_id, slot = %slot_label(&prior), "Wine removed from slot");
    Ok(prior)
}

/// Shared place/move path: validate → check → snapshot → upsert → record.
async fn upsert_checked(
    pool: &PgPool,
    ledger: &mut RollbackLedger,
    action: PlacementAction,
    wine_id: DbId,
    storage_unit_id: DbId,
    coord: SlotCoordinate,
) -> Result<SlotAssignment, CellarError> {
    let unit = load_unit(pool, storage_unit_id).await?;
    unit.validate_coordinate(&coord)?;
    ensure_wine_exists(pool, wine_id).await?;

    let check = collision::check(pool, storage_unit_id, &coord, wine_id, unit.stacking_enabled).await;
    if check.blocked {
        let reason = check
            .reason
            .unwrap_or_else(|| format!("Slot {} is unavailable", coord.label()));
        return Err(CellarError::SlotOccupied(reason));
    }

    let prior = SlotRepo::find_by_wine_id(pool, wine_id).await?;
    let previous = prior.as_ref().map(SlotAssignment::snapshot).transpose()?;

    let placed = SlotRepo::upsert(
        pool,
        &PlaceSlotAssignment::new(wine_id, storage_unit_id, coord),
    )
    .await?;

    ledger.record(RollbackEntry {
        wine_id,
        action,
        previous,
        recorded_at: Utc::now(),
    });

    tracing::info!(
        wine_id,
        storage_unit_id,
        slot = %coord.label(),
        ?action,
        "Wine placed",
    );
    Ok(placed)
}

async fn load_unit(pool: &PgPool, storage_unit_id: DbId) -> Result<StorageUnit, CellarError> {
    StorageUnitRepo::find_by_id(pool, storage_unit_id)
        .await?
        .ok_or(CellarError::Core(CoreError::NotFound {
            entity: "StorageUnit",
            id: storage_unit_id,
        }))
}

async fn ensure_wine_exists(pool: &PgPool, wine_id: DbId) -> Result<(), CellarError> {
    WineRepo::find_by_id(pool, wine_id)
        .await?
        .map(|_| ())
        .ok_or(CellarError::Core(CoreError::NotFound {
            entity: "Wine",
            id: wine_id,
        }))
}

fn slot_label(assignment: &SlotAssignment) -> String {
    assignment
        .coordinate()
        .map(|c| c.label())
        .unwrap_or_else(|_| format!("{}:{}:{}", assignment.shelf, assignment.column_position, assignment.depth))
}
