//! Enrichment suggestion models: externally generated metadata awaiting
//! review.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use vinoteca_core::enrichment::WineEnrichment;
use vinoteca_core::error::CoreError;
use vinoteca_core::types::{DbId, Timestamp};

/// Review status, stored as SMALLINT.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(i16)]
pub enum SuggestionStatus {
    Pending = 1,
    Applied = 2,
    Dismissed = 3,
}

impl SuggestionStatus {
    /// Return the database status code.
    pub fn code(self) -> i16 {
        self as i16
    }

    pub fn from_code(code: i16) -> Result<Self, CoreError> {
        match code {
            1 => Ok(Self::Pending),
            2 => Ok(Self::Applied),
            3 => Ok(Self::Dismissed),
            other => Err(CoreError::Validation(format!(
                "Invalid suggestion status code {other}"
            ))),
        }
    }
}

/// A row from the `enrichment_suggestions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct EnrichmentSuggestion {
    pub id: DbId,
    pub wine_id: DbId,
    /// `WineEnrichment` serialized as JSONB.
    pub payload: serde_json::Value,
    /// Status code: 1 = pending, 2 = applied, 3 = dismissed.
    pub status: i16,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl EnrichmentSuggestion {
    /// Deserialize the structured payload.
    pub fn enrichment(&self) -> Result<WineEnrichment, CoreError> {
        serde_json::from_value(self.payload.clone())
            .map_err(|e| CoreError::Internal(format!("Malformed suggestion payload: {e}")))
    }
}

/// DTO for recording a new pending suggestion.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSuggestion {
    pub wine_id: DbId,
    pub payload: WineEnrichment,
}
