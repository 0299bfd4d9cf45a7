//! Handlers for the ghost preview and the session occupancy projection.
//!
//! The preview is session state only: starting, retargeting, and cancelling
//! never touch the database. Confirm is the single point where the preview
//! becomes a persisted placement.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use vinoteca_core::error::CoreError;
use vinoteca_core::slot::{Depth, SlotCoordinate};
use vinoteca_core::types::DbId;
use vinoteca_db::repositories::{StorageUnitRepo, WineRepo};

use crate::error::{AppError, AppResult};
use crate::handlers::wines::PlacementResponse;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /api/v1/cellar/ghost`.
#[derive(Debug, Deserialize)]
pub struct GhostRequest {
    pub wine_id: DbId,
    pub storage_unit_id: DbId,
    pub shelf: i16,
    pub column: i16,
    pub depth: Depth,
}

/// Request body for `PUT /api/v1/cellar/ghost`.
#[derive(Debug, Deserialize)]
pub struct RetargetRequest {
    pub shelf: i16,
    pub column: i16,
    pub depth: Depth,
}

/// Query parameters for `GET /api/v1/cellar/occupancy`.
#[derive(Debug, Deserialize)]
pub struct OccupancyParams {
    pub storage_unit_id: DbId,
}

/// GET /api/v1/cellar/ghost
pub async fn get_ghost(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let session = state.session.lock().await;

    Ok(Json(DataResponse {
        data: *session.ghost(),
    }))
}

/// POST /api/v1/cellar/ghost
///
/// Begin (or replace) a preview. Validates that the wine and unit exist and
/// that the target is inside the unit's grid, but persists nothing.
pub async fn start_ghost(
    State(state): State<AppState>,
    Json(input): Json<GhostRequest>,
) -> AppResult<impl IntoResponse> {
    let coord = SlotCoordinate::new(input.shelf, input.column, input.depth)?;

    WineRepo::find_by_id(&state.pool, input.wine_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Wine",
            id: input.wine_id,
        }))?;

    let unit = StorageUnitRepo::find_by_id(&state.pool, input.storage_unit_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "StorageUnit",
            id: input.storage_unit_id,
        }))?;
    unit.validate_coordinate(&coord)?;

    let mut session = state.session.lock().await;
    session.start_ghost(input.wine_id, input.storage_unit_id, coord);

    Ok(Json(DataResponse {
        data: *session.ghost(),
    }))
}

/// PUT /api/v1/cellar/ghost
///
/// Adjust the previewed target slot. 409 `NO_GHOST` when nothing is being
/// previewed.
pub async fn retarget_ghost(
    State(state): State<AppState>,
    Json(input): Json<RetargetRequest>,
) -> AppResult<impl IntoResponse> {
    let coord = SlotCoordinate::new(input.shelf, input.column, input.depth)?;

    let mut session = state.session.lock().await;
    session.retarget_ghost(coord)?;

    Ok(Json(DataResponse {
        data: *session.ghost(),
    }))
}

/// DELETE /api/v1/cellar/ghost
///
/// Discard the preview. Safe to call when idle.
pub async fn cancel_ghost(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let mut session = state.session.lock().await;
    session.cancel_ghost();

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/cellar/ghost/confirm
///
/// Commit the preview as a real placement. On collision the preview stays
/// active so the caller can retarget and retry.
pub async fn confirm_ghost(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let mut session = state.session.lock().await;
    let assignment = session.confirm_ghost(&state.pool).await?;

    Ok(Json(DataResponse {
        data: PlacementResponse::from_assignment(assignment)?,
    }))
}

/// GET /api/v1/cellar/occupancy?storage_unit_id=N
///
/// Rebuild and return the session's occupancy projection for one unit.
pub async fn session_occupancy(
    State(state): State<AppState>,
    Query(params): Query<OccupancyParams>,
) -> AppResult<impl IntoResponse> {
    StorageUnitRepo::find_by_id(&state.pool, params.storage_unit_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "StorageUnit",
            id: params.storage_unit_id,
        }))?;

    let mut session = state.session.lock().await;
    let projection = session
        .refresh_occupancy(&state.pool, params.storage_unit_id)
        .await?
        .clone();

    Ok(Json(DataResponse { data: projection }))
}
