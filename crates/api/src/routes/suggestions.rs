//! Route definitions for reviewing enrichment suggestions.
//!
//! Creation and listing are wine-scoped and live under `/wines/{id}/suggestions`.

use axum::routing::post;
use axum::Router;

use crate::handlers::suggestions;
use crate::state::AppState;

/// Suggestion review routes mounted at `/suggestions`.
///
/// ```text
/// POST /{id}/apply     -> apply_suggestion
/// POST /{id}/dismiss   -> dismiss_suggestion
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{id}/apply", post(suggestions::apply_suggestion))
        .route("/{id}/dismiss", post(suggestions::dismiss_suggestion))
}
