//! Route definitions for wines and the per-wine placement surface.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::{suggestions, wines};
use crate::state::AppState;

/// Wine routes mounted at `/wines`.
///
/// ```text
/// GET    /                       -> list_wines
/// POST   /                       -> create_wine
/// GET    /{id}                   -> get_wine
/// PUT    /{id}                   -> update_wine
/// DELETE /{id}                   -> delete_wine
/// POST   /{id}/drunk             -> mark_drunk
/// DELETE /{id}/drunk             -> unmark_drunk
/// PUT    /{id}/slot              -> place_wine (place or move)
/// DELETE /{id}/slot              -> remove_from_slot
/// POST   /{id}/slot/undo         -> undo_placement
/// GET    /{id}/suggestions       -> list_suggestions
/// POST   /{id}/suggestions       -> create_suggestion
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(wines::list_wines).post(wines::create_wine))
        .route(
            "/{id}",
            get(wines::get_wine)
                .put(wines::update_wine)
                .delete(wines::delete_wine),
        )
        .route(
            "/{id}/drunk",
            post(wines::mark_drunk).delete(wines::unmark_drunk),
        )
        .route(
            "/{id}/slot",
            put(wines::place_wine).delete(wines::remove_from_slot),
        )
        .route("/{id}/slot/undo", post(wines::undo_placement))
        .route(
            "/{id}/suggestions",
            get(suggestions::list_suggestions).post(suggestions::create_suggestion),
        )
}
