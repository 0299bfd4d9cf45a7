//! Handlers for enrichment suggestions: recording, reviewing, and the
//! field-level apply/dismiss flow.
//!
//! A suggestion never overwrites user-entered data wholesale: apply merges
//! field by field, and the caller can restrict the merge to a subset of
//! fields (`tasting`, `pairing`, `history`).

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use vinoteca_core::enrichment::{
    merge, select_fields, EnrichmentField, WineEnrichment,
};
use vinoteca_core::error::CoreError;
use vinoteca_core::types::DbId;
use vinoteca_db::models::suggestion::{CreateSuggestion, EnrichmentSuggestion, SuggestionStatus};
use vinoteca_db::repositories::{SuggestionRepo, WineRepo};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /api/v1/wines/{id}/suggestions`.
///
/// With a payload, the suggestion is recorded as-is. Without one, the
/// configured provider generates it from the wine's catalog facts.
#[derive(Debug, Deserialize)]
pub struct CreateSuggestionRequest {
    pub payload: Option<WineEnrichment>,
}

/// Query parameters for `GET /api/v1/wines/{id}/suggestions`.
#[derive(Debug, Deserialize)]
pub struct SuggestionListParams {
    pub status: Option<SuggestionStatus>,
}

/// Request body for `POST /api/v1/suggestions/{id}/apply`.
#[derive(Debug, Default, Deserialize)]
pub struct ApplySuggestionRequest {
    /// Field names to apply (`tasting`, `pairing`, `history`). Absent means
    /// all fields the suggestion carries.
    pub fields: Option<Vec<String>>,
}

/// POST /api/v1/wines/{id}/suggestions
pub async fn create_suggestion(
    State(state): State<AppState>,
    Path(wine_id): Path<DbId>,
    Json(input): Json<CreateSuggestionRequest>,
) -> AppResult<impl IntoResponse> {
    let wine = WineRepo::find_by_id(&state.pool, wine_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Wine",
            id: wine_id,
        }))?;

    let payload = match input.payload {
        Some(payload) => payload,
        None => match &state.provider {
            Some(provider) => provider.suggest(&wine.facts()).await?,
            None => {
                return Err(AppError::BadRequest(
                    "No suggestion provider configured; supply a payload".to_string(),
                ))
            }
        },
    };

    if payload.is_empty() {
        return Err(AppError::BadRequest(
            "Suggestion payload is empty".to_string(),
        ));
    }

    let suggestion =
        SuggestionRepo::create(&state.pool, &CreateSuggestion { wine_id, payload }).await?;

    tracing::info!(wine_id, suggestion_id = suggestion.id, "Suggestion recorded");

    Ok((StatusCode::CREATED, Json(DataResponse { data: suggestion })))
}

/// GET /api/v1/wines/{id}/suggestions
pub async fn list_suggestions(
    State(state): State<AppState>,
    Path(wine_id): Path<DbId>,
    Query(params): Query<SuggestionListParams>,
) -> AppResult<impl IntoResponse> {
    WineRepo::find_by_id(&state.pool, wine_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Wine",
            id: wine_id,
        }))?;

    let suggestions = SuggestionRepo::list_for_wine(&state.pool, wine_id, params.status).await?;

    Ok(Json(DataResponse { data: suggestions }))
}

/// POST /api/v1/suggestions/{id}/apply
///
/// Merge a pending suggestion into the wine's enrichment record, optionally
/// restricted to named fields. Returns the updated wine.
pub async fn apply_suggestion(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    body: Option<Json<ApplySuggestionRequest>>,
) -> AppResult<impl IntoResponse> {
    let Json(input) = body.unwrap_or_default();
    let suggestion = find_pending(&state, id).await?;

    let wine = WineRepo::find_by_id(&state.pool, suggestion.wine_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Wine",
            id: suggestion.wine_id,
        }))?;

    let suggested = suggestion.enrichment()?;
    let selected = match &input.fields {
        Some(names) => {
            let fields = names
                .iter()
                .map(|name| EnrichmentField::parse(name))
                .collect::<Result<Vec<_>, _>>()?;
            select_fields(&suggested, &fields)
        }
        None => suggested,
    };

    let current: WineEnrichment = serde_json::from_value(wine.enrichment.clone())
        .map_err(|e| CoreError::Internal(format!("Malformed enrichment record: {e}")))?;
    let merged = merge(&current, &selected);
    let value = serde_json::to_value(&merged)
        .map_err(|e| CoreError::Internal(format!("Failed to serialize enrichment: {e}")))?;

    let updated = WineRepo::set_enrichment(&state.pool, wine.id, &value)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Wine",
            id: wine.id,
        }))?;

    SuggestionRepo::set_status(&state.pool, id, SuggestionStatus::Applied).await?;

    tracing::info!(
        suggestion_id = id,
        wine_id = wine.id,
        "Suggestion applied"
    );

    Ok(Json(DataResponse { data: updated }))
}

/// POST /api/v1/suggestions/{id}/dismiss
///
/// Reject a pending suggestion without touching the wine's record.
pub async fn dismiss_suggestion(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    find_pending(&state, id).await?;

    let dismissed = SuggestionRepo::set_status(&state.pool, id, SuggestionStatus::Dismissed)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Suggestion",
            id,
        }))?;

    tracing::info!(suggestion_id = id, "Suggestion dismissed");

    Ok(Json(DataResponse { data: dismissed }))
}

/// Fetch a suggestion and ensure it is still awaiting review.
async fn find_pending(state: &AppState, id: DbId) -> Result<EnrichmentSuggestion, AppError> {
    let suggestion = SuggestionRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Suggestion",
            id,
        }))?;

    if SuggestionStatus::from_code(suggestion.status)? != SuggestionStatus::Pending {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Suggestion {id} has already been reviewed"
        ))));
    }

    Ok(suggestion)
}
