//! Repository for the `enrichment_suggestions` table.

use sqlx::PgPool;
use vinoteca_core::types::DbId;

use crate::models::suggestion::{CreateSuggestion, EnrichmentSuggestion, SuggestionStatus};

const COLUMNS: &str = "id, wine_id, payload, status, created_at, updated_at";

/// Provides CRUD operations for enrichment suggestions under review.
pub struct SuggestionRepo;

impl SuggestionRepo {
    /// Record a new pending suggestion.
    pub async fn create(
        pool: &PgPool,
        input: &CreateSuggestion,
    ) -> Result<EnrichmentSuggestion, sqlx::Error> {
        let payload = serde_json::to_value(&input.payload)
            .map_err(|e| sqlx::Error::Encode(Box::new(e)))?;
        let query = format!(
            "INSERT INTO enrichment_suggestions (wine_id, payload)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, EnrichmentSuggestion>(&query)
            .bind(input.wine_id)
            .bind(payload)
            .fetch_one(pool)
            .await
    }

    /// Find a suggestion by ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<EnrichmentSuggestion>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM enrichment_suggestions WHERE id = $1");
        sqlx::query_as::<_, EnrichmentSuggestion>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a wine's suggestions, optionally filtered by status, newest
    /// first.
    pub async fn list_for_wine(
        pool: &PgPool,
        wine_id: DbId,
        status: Option<SuggestionStatus>,
    ) -> Result<Vec<EnrichmentSuggestion>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM enrichment_suggestions
             WHERE wine_id = $1 AND ($2::smallint IS NULL OR status = $2)
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, EnrichmentSuggestion>(&query)
            .bind(wine_id)
            .bind(status.map(SuggestionStatus::code))
            .fetch_all(pool)
            .await
    }

    /// Transition a suggestion to a new review status.
    pub async fn set_status(
        pool: &PgPool,
        id: DbId,
        status: SuggestionStatus,
    ) -> Result<Option<EnrichmentSuggestion>, sqlx::Error> {
        let query = format!(
            "UPDATE enrichment_suggestions SET status = $2, updated_at = now()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, EnrichmentSuggestion>(&query)
            .bind(id)
            .bind(status.code())
            .fetch_optional(pool)
            .await
    }
}
