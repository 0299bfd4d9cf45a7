//! Route definitions for storage units.

use axum::routing::get;
use axum::Router;

use crate::handlers::storage_units;
use crate::state::AppState;

/// Storage unit routes mounted at `/storage-units`.
///
/// ```text
/// GET    /                  -> list_units
/// POST   /                  -> create_unit
/// GET    /{id}              -> get_unit
/// PUT    /{id}              -> update_unit
/// DELETE /{id}              -> delete_unit
/// GET    /{id}/occupancy    -> unit_occupancy
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(storage_units::list_units).post(storage_units::create_unit),
        )
        .route(
            "/{id}",
            get(storage_units::get_unit)
                .put(storage_units::update_unit)
                .delete(storage_units::delete_unit),
        )
        .route("/{id}/occupancy", get(storage_units::unit_occupancy))
}
