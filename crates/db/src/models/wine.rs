//! Wine catalog models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use vinoteca_core::enrichment::WineFacts;
use vinoteca_core::error::CoreError;
use vinoteca_core::types::{DbId, Timestamp};

// ---------------------------------------------------------------------------
// Entity struct (database row)
// ---------------------------------------------------------------------------

/// A row from the `wines` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Wine {
    pub id: DbId,
    pub name: String,
    pub producer: Option<String>,
    pub vintage: Option<i16>,
    pub region: Option<String>,
    pub grape_variety: Option<String>,
    pub notes: Option<String>,
    /// 1-100 scale, unset until the household rates the bottle.
    pub rating: Option<i16>,
    /// Set when the bottle is marked drunk; cleared when un-marked.
    pub drunk_at: Option<Timestamp>,
    /// Enrichment record (`WineEnrichment` serialized as JSONB).
    pub enrichment: serde_json::Value,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Wine {
    /// The catalog facts handed to a suggestion provider.
    pub fn facts(&self) -> WineFacts {
        WineFacts {
            name: self.name.clone(),
            producer: self.producer.clone(),
            vintage: self.vintage,
            region: self.region.clone(),
            grape_variety: self.grape_variety.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// DTOs (request payloads)
// ---------------------------------------------------------------------------

/// DTO for cataloging a new bottle.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateWine {
    pub name: String,
    pub producer: Option<String>,
    pub vintage: Option<i16>,
    pub region: Option<String>,
    pub grape_variety: Option<String>,
    pub notes: Option<String>,
    pub rating: Option<i16>,
}

/// DTO for partially updating a wine. Only non-`None` fields are applied.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateWine {
    pub name: Option<String>,
    pub producer: Option<String>,
    pub vintage: Option<i16>,
    pub region: Option<String>,
    pub grape_variety: Option<String>,
    pub notes: Option<String>,
    pub rating: Option<i16>,
}

/// Validate a 1-100 rating.
pub fn validate_rating(rating: i16) -> Result<(), CoreError> {
    if (1..=100).contains(&rating) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Rating must be between 1 and 100, got {rating}"
        )))
    }
}

/// Validate a wine name is non-empty.
pub fn validate_name(name: &str) -> Result<(), CoreError> {
    if name.trim().is_empty() {
        Err(CoreError::Validation("Wine name must not be empty".into()))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_bounds() {
        assert!(validate_rating(1).is_ok());
        assert!(validate_rating(100).is_ok());
        assert!(validate_rating(0).is_err());
        assert!(validate_rating(101).is_err());
    }

    #[test]
    fn test_name_must_not_be_blank() {
        assert!(validate_name("Barolo").is_ok());
        assert!(validate_name("").is_err());
        assert!(validate_name("   ").is_err());
    }
}
