//! Handlers for the wine catalog and the per-wine placement surface.
//!
//! Placement writes (`PUT /slot`, `DELETE /slot`, `POST /slot/undo`) go
//! through the shared [`CellarSession`](vinoteca_cellar::session::CellarSession)
//! so every change lands in the rollback ledger.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use vinoteca_core::error::CoreError;
use vinoteca_core::slot::{Depth, SlotCoordinate};
use vinoteca_core::types::DbId;
use vinoteca_db::models::slot::SlotAssignment;
use vinoteca_db::models::wine::{validate_name, validate_rating, CreateWine, UpdateWine};
use vinoteca_db::repositories::{SlotRepo, WineRepo};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for `GET /api/v1/wines`.
#[derive(Debug, Deserialize)]
pub struct WineListParams {
    /// `true` = only drunk bottles, `false` = only cellared, absent = all.
    pub drunk: Option<bool>,
}

/// Request body for `PUT /api/v1/wines/{id}/slot`.
#[derive(Debug, Deserialize)]
pub struct SlotRequest {
    pub storage_unit_id: DbId,
    pub shelf: i16,
    pub column: i16,
    pub depth: Depth,
}

impl SlotRequest {
    pub fn coordinate(&self) -> Result<SlotCoordinate, CoreError> {
        SlotCoordinate::new(self.shelf, self.column, self.depth)
    }
}

/// A placement write's result: the persisted row plus display strings.
#[derive(Debug, Serialize)]
pub struct PlacementResponse {
    pub assignment: SlotAssignment,
    /// Canonical slot key, e.g. `3:5:1`.
    pub key: String,
    /// Human-readable label, e.g. `S3 · C5 · Front`.
    pub label: String,
}

impl PlacementResponse {
    pub fn from_assignment(assignment: SlotAssignment) -> Result<Self, CoreError> {
        let coord = assignment.coordinate()?;
        Ok(Self {
            key: coord.key(),
            label: coord.label(),
            assignment,
        })
    }
}

// ---------------------------------------------------------------------------
// Catalog CRUD
// ---------------------------------------------------------------------------

/// GET /api/v1/wines
pub async fn list_wines(
    State(state): State<AppState>,
    Query(params): Query<WineListParams>,
) -> AppResult<impl IntoResponse> {
    let wines = WineRepo::list(&state.pool, params.drunk).await?;

    Ok(Json(DataResponse { data: wines }))
}

/// POST /api/v1/wines
pub async fn create_wine(
    State(state): State<AppState>,
    Json(input): Json<CreateWine>,
) -> AppResult<impl IntoResponse> {
    validate_name(&input.name)?;
    if let Some(rating) = input.rating {
        validate_rating(rating)?;
    }

    let wine = WineRepo::create(&state.pool, &input).await?;

    tracing::info!(wine_id = wine.id, name = %wine.name, "Wine created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: wine })))
}

/// GET /api/v1/wines/{id}
pub async fn get_wine(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let wine = WineRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Wine", id }))?;

    Ok(Json(DataResponse { data: wine }))
}

/// PUT /api/v1/wines/{id}
///
/// Partial update: only fields present in the body are applied.
pub async fn update_wine(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateWine>,
) -> AppResult<impl IntoResponse> {
    if let Some(name) = &input.name {
        validate_name(name)?;
    }
    if let Some(rating) = input.rating {
        validate_rating(rating)?;
    }

    let wine = WineRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Wine", id }))?;

    Ok(Json(DataResponse { data: wine }))
}

/// DELETE /api/v1/wines/{id}
///
/// The slot assignment, if any, cascades away with the row.
pub async fn delete_wine(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let deleted = WineRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound { entity: "Wine", id }));
    }

    tracing::info!(wine_id = id, "Wine deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/wines/{id}/drunk
pub async fn mark_drunk(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let wine = WineRepo::set_drunk(&state.pool, id, true)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Wine", id }))?;

    Ok(Json(DataResponse { data: wine }))
}

/// DELETE /api/v1/wines/{id}/drunk
pub async fn unmark_drunk(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let wine = WineRepo::set_drunk(&state.pool, id, false)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Wine", id }))?;

    Ok(Json(DataResponse { data: wine }))
}

// ---------------------------------------------------------------------------
// Placement
// ---------------------------------------------------------------------------

/// PUT /api/v1/wines/{id}/slot
///
/// Place an unplaced wine, or move a placed one. The distinction matters
/// only for the rollback ledger; both are a single upsert underneath.
pub async fn place_wine(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<SlotRequest>,
) -> AppResult<impl IntoResponse> {
    let coord = input.coordinate()?;

    let mut session = state.session.lock().await;
    let already_placed = SlotRepo::find_by_wine_id(&state.pool, id).await?.is_some();
    let assignment = if already_placed {
        session
            .relocate(&state.pool, id, input.storage_unit_id, coord)
            .await?
    } else {
        session
            .place(&state.pool, id, input.storage_unit_id, coord)
            .await?
    };

    Ok(Json(DataResponse {
        data: PlacementResponse::from_assignment(assignment)?,
    }))
}

/// DELETE /api/v1/wines/{id}/slot
pub async fn remove_from_slot(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let mut session = state.session.lock().await;
    let removed = session.remove(&state.pool, id).await?;

    Ok(Json(DataResponse {
        data: PlacementResponse::from_assignment(removed)?,
    }))
}

/// POST /api/v1/wines/{id}/slot/undo
///
/// Reverse the wine's most recent placement change. Replays through the
/// forward commands, so the undo itself lands in the ledger and can be
/// undone in turn.
pub async fn undo_placement(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let mut session = state.session.lock().await;
    let outcome = session.undo_last(&state.pool, id).await?;

    tracing::info!(wine_id = id, undone = ?outcome.undone, "Placement change undone");

    Ok(Json(DataResponse { data: outcome }))
}
