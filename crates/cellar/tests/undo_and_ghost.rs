//! Integration tests for undo semantics and the ghost-preview session flow.

mod common;

use assert_matches::assert_matches;
use common::{coord, seed_unit, seed_wine};
use sqlx::PgPool;
use vinoteca_cellar::session::CellarSession;
use vinoteca_cellar::{commands, undo, CellarError};
use vinoteca_core::ledger::{PlacementAction, RollbackLedger};
use vinoteca_core::slot::Depth;
use vinoteca_db::repositories::SlotRepo;

// ---------------------------------------------------------------------------
// Undo
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn undo_after_place_removes_the_assignment(pool: PgPool) {
    let wine = seed_wine(&pool, "Wine A").await;
    let unit = seed_unit(&pool, "Rack A", false).await;
    let mut ledger = RollbackLedger::new();

    commands::place(&pool, &mut ledger, wine, unit, coord(2, 2, Depth::Front))
        .await
        .unwrap();

    let outcome = undo::undo_last(&pool, &mut ledger, wine).await.unwrap();
    assert_eq!(outcome.undone, PlacementAction::Place);
    assert!(outcome.restored.is_none());
    assert!(SlotRepo::find_by_wine_id(&pool, wine).await.unwrap().is_none());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn undo_after_remove_restores_the_prior_coordinate(pool: PgPool) {
    let wine = seed_wine(&pool, "Wine A").await;
    let unit = seed_unit(&pool, "Rack A", false).await;
    let mut ledger = RollbackLedger::new();

    commands::place(&pool, &mut ledger, wine, unit, coord(3, 4, Depth::Back))
        .await
        .unwrap();
    commands::remove(&pool, &mut ledger, wine).await.unwrap();

    let outcome = undo::undo_last(&pool, &mut ledger, wine).await.unwrap();
    assert_eq!(outcome.undone, PlacementAction::Remove);
    let restored = outcome.restored.unwrap();
    assert_eq!(
        (restored.shelf, restored.column_position, restored.depth),
        (3, 4, 2)
    );
}

#[sqlx::test(migrations = "../db/migrations")]
async fn undo_after_move_returns_to_the_recorded_coordinate(pool: PgPool) {
    let wine = seed_wine(&pool, "Wine A").await;
    let unit = seed_unit(&pool, "Rack A", false).await;
    let mut ledger = RollbackLedger::new();

    commands::place(&pool, &mut ledger, wine, unit, coord(1, 1, Depth::Front))
        .await
        .unwrap();
    commands::relocate(&pool, &mut ledger, wine, unit, coord(5, 5, Depth::Front))
        .await
        .unwrap();

    let outcome = undo::undo_last(&pool, &mut ledger, wine).await.unwrap();
    assert_eq!(outcome.undone, PlacementAction::Move);
    let restored = outcome.restored.unwrap();
    assert_eq!((restored.shelf, restored.column_position), (1, 1));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn undo_with_empty_ledger_performs_no_writes(pool: PgPool) {
    let wine = seed_wine(&pool, "Wine A").await;
    let unit = seed_unit(&pool, "Rack A", false).await;
    let mut ledger = RollbackLedger::new();

    commands::place(&pool, &mut ledger, wine, unit, coord(1, 1, Depth::Front))
        .await
        .unwrap();
    ledger.clear(wine);

    let err = undo::undo_last(&pool, &mut ledger, wine).await.unwrap_err();
    assert_matches!(err, CellarError::NothingToUndo);
    assert_eq!(err.to_string(), "No changes to undo");

    // The assignment is untouched.
    assert!(SlotRepo::find_by_wine_id(&pool, wine).await.unwrap().is_some());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn undo_into_a_taken_slot_surfaces_the_collision(pool: PgPool) {
    let wine_a = seed_wine(&pool, "Wine A").await;
    let wine_b = seed_wine(&pool, "Wine B").await;
    let unit = seed_unit(&pool, "Rack A", false).await;
    let mut ledger = RollbackLedger::new();

    commands::place(&pool, &mut ledger, wine_a, unit, coord(1, 1, Depth::Front))
        .await
        .unwrap();
    commands::relocate(&pool, &mut ledger, wine_a, unit, coord(2, 2, Depth::Front))
        .await
        .unwrap();
    // Something else takes the old slot in the meantime.
    commands::place(&pool, &mut ledger, wine_b, unit, coord(1, 1, Depth::Front))
        .await
        .unwrap();

    let err = undo::undo_last(&pool, &mut ledger, wine_a).await.unwrap_err();
    assert_matches!(err, CellarError::SlotOccupied(_));

    // The entry stays popped and wine A stays where it was.
    assert_eq!(ledger.depth(wine_a), 1);
    let current = SlotRepo::find_by_wine_id(&pool, wine_a).await.unwrap().unwrap();
    assert_eq!((current.shelf, current.column_position), (2, 2));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn undo_replays_through_commands_so_it_is_itself_undoable(pool: PgPool) {
    let wine = seed_wine(&pool, "Wine A").await;
    let unit = seed_unit(&pool, "Rack A", false).await;
    let mut ledger = RollbackLedger::new();

    commands::place(&pool, &mut ledger, wine, unit, coord(1, 1, Depth::Front))
        .await
        .unwrap();
    // Undo the place: wine comes off the grid, and the removal is recorded.
    undo::undo_last(&pool, &mut ledger, wine).await.unwrap();
    assert!(SlotRepo::find_by_wine_id(&pool, wine).await.unwrap().is_none());

    // Undoing the undo restores the placement.
    let outcome = undo::undo_last(&pool, &mut ledger, wine).await.unwrap();
    let restored = outcome.restored.unwrap();
    assert_eq!((restored.shelf, restored.column_position, restored.depth), (1, 1, 1));
}

// ---------------------------------------------------------------------------
// Ghost preview (session)
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn ghost_confirm_places_an_unassigned_wine(pool: PgPool) {
    let wine = seed_wine(&pool, "Wine A").await;
    let unit = seed_unit(&pool, "Rack A", false).await;
    let mut session = CellarSession::new();

    session.start_ghost(wine, unit, coord(2, 3, Depth::Front));
    assert!(session.ghost().is_previewing());

    let placed = session.confirm_ghost(&pool).await.unwrap();
    assert_eq!(placed.wine_id, wine);
    assert!(!session.ghost().is_previewing());
    // Occupancy was refreshed as part of the confirm.
    assert!(session.occupancy().keys.contains("2:3:1"));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn ghost_confirm_moves_an_already_placed_wine(pool: PgPool) {
    let wine = seed_wine(&pool, "Wine A").await;
    let unit = seed_unit(&pool, "Rack A", false).await;
    let mut session = CellarSession::new();

    session.place(&pool, wine, unit, coord(1, 1, Depth::Front)).await.unwrap();

    session.start_ghost(wine, unit, coord(4, 4, Depth::Front));
    session.confirm_ghost(&pool).await.unwrap();

    assert!(session.occupancy().keys.contains("4:4:1"));
    assert!(!session.occupancy().keys.contains("1:1:1"));
    // The confirm resolved to a move, so undo returns the wine to 1:1.
    let outcome = session.undo_last(&pool, wine).await.unwrap();
    assert_eq!(outcome.undone, PlacementAction::Move);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn ghost_cancel_discards_without_persisting(pool: PgPool) {
    let wine = seed_wine(&pool, "Wine A").await;
    let unit = seed_unit(&pool, "Rack A", false).await;
    let mut session = CellarSession::new();

    session.start_ghost(wine, unit, coord(2, 3, Depth::Front));
    session.cancel_ghost();

    assert!(!session.ghost().is_previewing());
    assert!(SlotRepo::find_by_wine_id(&pool, wine).await.unwrap().is_none());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn ghost_retarget_changes_the_confirmed_slot(pool: PgPool) {
    let wine = seed_wine(&pool, "Wine A").await;
    let unit = seed_unit(&pool, "Rack A", false).await;
    let mut session = CellarSession::new();

    session.start_ghost(wine, unit, coord(2, 3, Depth::Front));
    session.retarget_ghost(coord(5, 6, Depth::Back)).unwrap();
    let placed = session.confirm_ghost(&pool).await.unwrap();

    assert_eq!((placed.shelf, placed.column_position, placed.depth), (5, 6, 2));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn ghost_confirm_failure_keeps_previewing(pool: PgPool) {
    let wine_a = seed_wine(&pool, "Wine A").await;
    let wine_b = seed_wine(&pool, "Wine B").await;
    let unit = seed_unit(&pool, "Rack A", false).await;
    let mut session = CellarSession::new();

    session.place(&pool, wine_a, unit, coord(1, 1, Depth::Front)).await.unwrap();

    session.start_ghost(wine_b, unit, coord(1, 1, Depth::Front));
    let err = session.confirm_ghost(&pool).await.unwrap_err();
    assert_matches!(err, CellarError::SlotOccupied(_));

    // Still previewing so the user can pick another slot.
    assert!(session.ghost().is_previewing());
    session.retarget_ghost(coord(2, 2, Depth::Front)).unwrap();
    session.confirm_ghost(&pool).await.unwrap();
    assert!(session.occupancy().keys.contains("2:2:1"));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn ghost_operations_without_a_preview_are_rejected(pool: PgPool) {
    let _wine = seed_wine(&pool, "Wine A").await;
    let _unit = seed_unit(&pool, "Rack A", false).await;
    let mut session = CellarSession::new();

    let err = session.retarget_ghost(coord(1, 1, Depth::Front)).unwrap_err();
    assert_matches!(err, CellarError::NoGhost(_));

    let err = session.confirm_ghost(&pool).await.unwrap_err();
    assert_matches!(err, CellarError::NoGhost(_));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn sessions_do_not_share_ledgers(pool: PgPool) {
    let wine = seed_wine(&pool, "Wine A").await;
    let unit = seed_unit(&pool, "Rack A", false).await;
    let mut session_a = CellarSession::new();
    let mut session_b = CellarSession::new();

    session_a.place(&pool, wine, unit, coord(1, 1, Depth::Front)).await.unwrap();

    // Session B saw none of session A's changes, so it has nothing to undo.
    let err = session_b.undo_last(&pool, wine).await.unwrap_err();
    assert_matches!(err, CellarError::NothingToUndo);
    assert_eq!(session_a.ledger().depth(wine), 1);
}
