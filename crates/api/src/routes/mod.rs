pub mod cellar;
pub mod health;
pub mod storage_units;
pub mod suggestions;
pub mod wines;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /wines                               list, create
/// /wines/{id}                          get, update, delete
/// /wines/{id}/drunk                    mark drunk (POST), back in cellar (DELETE)
/// /wines/{id}/slot                     place or move (PUT), remove (DELETE)
/// /wines/{id}/slot/undo                reverse the last placement change (POST)
/// /wines/{id}/suggestions              list (GET), record or generate (POST)
///
/// /storage-units                       list, create
/// /storage-units/{id}                  get, update, delete
/// /storage-units/{id}/occupancy        recomputed occupancy projection (GET)
///
/// /cellar/ghost                        get, start (POST), retarget (PUT), cancel (DELETE)
/// /cellar/ghost/confirm                commit the preview (POST)
/// /cellar/occupancy                    session projection (GET ?storage_unit_id=N)
///
/// /suggestions/{id}/apply              merge into the wine's record (POST)
/// /suggestions/{id}/dismiss            reject without applying (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/wines", wines::router())
        .nest("/storage-units", storage_units::router())
        .nest("/cellar", cellar::router())
        .nest("/suggestions", suggestions::router())
}
