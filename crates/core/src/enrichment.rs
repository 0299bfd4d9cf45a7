//! Field-level enrichment reconciliation.
//!
//! Externally generated metadata suggestions arrive as a partial
//! [`WineEnrichment`]: an explicit struct with one optional sub-record per
//! category rather than a dynamic key/value bag. Merging fills only the
//! categories a suggestion carries, and [`without_field`] clears exactly one
//! category, so a partial suggestion (or a partial apply) can never corrupt
//! unrelated fields.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Categories
// ---------------------------------------------------------------------------

/// Tasting-note category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TastingProfile {
    /// Dominant aromas, e.g. "blackcurrant", "cedar".
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aromas: Vec<String>,
    /// Body description, e.g. "full-bodied".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    /// Finish description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish: Option<String>,
}

/// Food-pairing category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoodPairing {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dishes: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serving_notes: Option<String>,
}

/// Producer/region background category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProducerHistory {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region_background: Option<String>,
}

/// Enrichment record stored on a wine and carried by suggestions.
///
/// One optional sub-record per category; `None` means "nothing known /
/// nothing suggested" for that category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WineEnrichment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tasting: Option<TastingProfile>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pairing: Option<FoodPairing>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub history: Option<ProducerHistory>,
}

impl WineEnrichment {
    /// Whether no category is present at all.
    pub fn is_empty(&self) -> bool {
        self.tasting.is_none() && self.pairing.is_none() && self.history.is_none()
    }
}

// ---------------------------------------------------------------------------
// Field selection
// ---------------------------------------------------------------------------

/// Names one enrichment category for per-field apply/clear operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnrichmentField {
    Tasting,
    Pairing,
    History,
}

impl EnrichmentField {
    pub const ALL: [Self; 3] = [Self::Tasting, Self::Pairing, Self::History];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Tasting => "tasting",
            Self::Pairing => "pairing",
            Self::History => "history",
        }
    }

    pub fn parse(name: &str) -> Result<Self, CoreError> {
        match name {
            "tasting" => Ok(Self::Tasting),
            "pairing" => Ok(Self::Pairing),
            "history" => Ok(Self::History),
            other => Err(CoreError::Validation(format!(
                "Unknown enrichment field '{other}'. Must be one of: tasting, pairing, history"
            ))),
        }
    }
}

/// Return a copy of `record` with the named category cleared and every other
/// category untouched.
pub fn without_field(record: &WineEnrichment, field: EnrichmentField) -> WineEnrichment {
    let mut cleared = record.clone();
    match field {
        EnrichmentField::Tasting => cleared.tasting = None,
        EnrichmentField::Pairing => cleared.pairing = None,
        EnrichmentField::History => cleared.history = None,
    }
    cleared
}

/// Return a copy of `record` containing only the named categories.
pub fn select_fields(record: &WineEnrichment, fields: &[EnrichmentField]) -> WineEnrichment {
    let mut selected = record.clone();
    for field in EnrichmentField::ALL {
        if !fields.contains(&field) {
            selected = without_field(&selected, field);
        }
    }
    selected
}

/// Merge a partial suggestion into the current record: categories present in
/// the suggestion replace the current value, categories absent are preserved.
pub fn merge(current: &WineEnrichment, suggestion: &WineEnrichment) -> WineEnrichment {
    WineEnrichment {
        tasting: suggestion.tasting.clone().or_else(|| current.tasting.clone()),
        pairing: suggestion.pairing.clone().or_else(|| current.pairing.clone()),
        history: suggestion.history.clone().or_else(|| current.history.clone()),
    }
}

// ---------------------------------------------------------------------------
// Suggestion provider (opaque AI collaborator)
// ---------------------------------------------------------------------------

/// The catalog facts a provider gets to work from.
#[derive(Debug, Clone, Serialize)]
pub struct WineFacts {
    pub name: String,
    pub producer: Option<String>,
    pub vintage: Option<i16>,
    pub region: Option<String>,
    pub grape_variety: Option<String>,
}

/// The external text-generation collaborator. Opaque to this crate: it
/// either returns structured suggestion data or fails.
#[async_trait::async_trait]
pub trait SuggestionProvider: Send + Sync {
    async fn suggest(&self, facts: &WineFacts) -> Result<WineEnrichment, CoreError>;
}
