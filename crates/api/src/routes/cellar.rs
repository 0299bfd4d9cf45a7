//! Route definitions for the session placement surface: ghost preview and
//! the session occupancy projection.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::cellar;
use crate::state::AppState;

/// Session routes mounted at `/cellar`.
///
/// ```text
/// GET    /ghost             -> get_ghost
/// POST   /ghost             -> start_ghost
/// PUT    /ghost             -> retarget_ghost
/// DELETE /ghost             -> cancel_ghost
/// POST   /ghost/confirm     -> confirm_ghost
/// GET    /occupancy         -> session_occupancy (?storage_unit_id=N)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/ghost",
            get(cellar::get_ghost)
                .post(cellar::start_ghost)
                .put(cellar::retarget_ghost)
                .delete(cellar::cancel_ghost),
        )
        .route("/ghost/confirm", post(cellar::confirm_ghost))
        .route("/occupancy", get(cellar::session_occupancy))
}
