//! Handlers for storage units (wine fridges, racks) and their occupancy.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use vinoteca_core::error::CoreError;
use vinoteca_core::occupancy::OccupancyProjection;
use vinoteca_core::types::DbId;
use vinoteca_db::models::slot::SlotAssignment;
use vinoteca_db::models::storage_unit::{
    validate_dimensions, CreateStorageUnit, UpdateStorageUnit,
};
use vinoteca_db::repositories::{SlotRepo, StorageUnitRepo};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/storage-units
pub async fn list_units(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let units = StorageUnitRepo::list_all(&state.pool).await?;

    Ok(Json(DataResponse { data: units }))
}

/// POST /api/v1/storage-units
pub async fn create_unit(
    State(state): State<AppState>,
    Json(input): Json<CreateStorageUnit>,
) -> AppResult<impl IntoResponse> {
    validate_dimensions(input.shelf_count, input.column_count)?;

    let unit = StorageUnitRepo::create(&state.pool, &input).await?;

    tracing::info!(storage_unit_id = unit.id, name = %unit.name, "Storage unit created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: unit })))
}

/// GET /api/v1/storage-units/{id}
pub async fn get_unit(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let unit = StorageUnitRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "StorageUnit",
            id,
        }))?;

    Ok(Json(DataResponse { data: unit }))
}

/// PUT /api/v1/storage-units/{id}
///
/// Partial update, including toggling `stacking_enabled`. Dimension changes
/// are validated against the merged values.
pub async fn update_unit(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateStorageUnit>,
) -> AppResult<impl IntoResponse> {
    let existing = StorageUnitRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "StorageUnit",
            id,
        }))?;

    validate_dimensions(
        input.shelf_count.unwrap_or(existing.shelf_count),
        input.column_count.unwrap_or(existing.column_count),
    )?;

    let unit = StorageUnitRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "StorageUnit",
            id,
        }))?;

    Ok(Json(DataResponse { data: unit }))
}

/// DELETE /api/v1/storage-units/{id}
///
/// Refused while wines are still placed in the unit.
pub async fn delete_unit(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let assignments = SlotRepo::list_for_unit(&state.pool, id).await?;
    if !assignments.is_empty() {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Storage unit {id} still holds {} placed wine(s)",
            assignments.len()
        ))));
    }

    let deleted = StorageUnitRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "StorageUnit",
            id,
        }));
    }

    tracing::info!(storage_unit_id = id, "Storage unit deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/storage-units/{id}/occupancy
///
/// Recomputed from the unit's full assignment list on every call; never
/// incrementally patched.
pub async fn unit_occupancy(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    StorageUnitRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "StorageUnit",
            id,
        }))?;

    let rows = SlotRepo::list_for_unit(&state.pool, id).await?;
    let coords = rows
        .iter()
        .map(SlotAssignment::coordinate)
        .collect::<Result<Vec<_>, _>>()?;
    let projection = OccupancyProjection::from_coordinates(&coords);

    Ok(Json(DataResponse { data: projection }))
}
