//! Advisory collision pre-check.
//!
//! The check is a fast, user-friendly gate ahead of the write; the
//! `uq_slot_position` constraint is the authoritative backstop for the
//! check-then-write gap. Lookup failures fail **closed**: an unreachable
//! database reports the slot as blocked, never as free.

use sqlx::PgPool;
use vinoteca_core::slot::{Depth, SlotCoordinate};
use vinoteca_core::types::DbId;
use vinoteca_db::repositories::SlotRepo;

/// Outcome of a collision check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollisionCheck {
    pub blocked: bool,
    /// Human-readable explanation when blocked.
    pub reason: Option<String>,
}

impl CollisionCheck {
    fn clear() -> Self {
        Self {
            blocked: false,
            reason: None,
        }
    }

    fn blocked(reason: String) -> Self {
        Self {
            blocked: true,
            reason: Some(reason),
        }
    }
}

/// Determine whether placing `exclude_wine_id` at `coord` is blocked.
///
/// Excluding the wine being placed means re-assigning a wine to its own
/// current slot never self-blocks.
pub async fn check(
    pool: &PgPool,
    storage_unit_id: DbId,
    coord: &SlotCoordinate,
    exclude_wine_id: DbId,
    stacking_enabled: bool,
) -> CollisionCheck {
    // Exact slot first: the same (shelf, column, depth).
    let exact = SlotRepo::find_at_slot(
        pool,
        storage_unit_id,
        coord.shelf,
        coord.column,
        coord.depth.code(),
        exclude_wine_id,
    )
    .await;
    match exact {
        Ok(Some(_)) => {
            return CollisionCheck::blocked(format!("Slot {} is already occupied", coord.label()));
        }
        Ok(None) => {}
        Err(err) => return fail_closed(err),
    }

    // With stacking off, the whole column is exclusive regardless of depth.
    if !stacking_enabled {
        let column = SlotRepo::find_in_column(
            pool,
            storage_unit_id,
            coord.shelf,
            coord.column,
            exclude_wine_id,
        )
        .await;
        match column {
            Ok(occupants) if !occupants.is_empty() => {
                let depth_label = Depth::from_code(occupants[0].depth)
                    .map(Depth::label)
                    .unwrap_or("Front");
                return CollisionCheck::blocked(format!(
                    "Column {} already holds a bottle at the {} and stacking is disabled",
                    coord.column_label(),
                    depth_label.to_lowercase()
                ));
            }
            Ok(_) => {}
            Err(err) => return fail_closed(err),
        }
    }

    CollisionCheck::clear()
}

fn fail_closed(err: sqlx::Error) -> CollisionCheck {
    tracing::error!(error = %err, "Collision lookup failed; treating slot as blocked");
    CollisionCheck::blocked("Failed to check slot availability".to_string())
}
