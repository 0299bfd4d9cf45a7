use std::sync::Arc;

use tokio::sync::Mutex;
use vinoteca_cellar::session::CellarSession;
use vinoteca_core::enrichment::SuggestionProvider;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: vinoteca_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// The household's placement session: rollback ledger, ghost preview,
    /// occupancy projection. A two-user app shares one session; the mutex
    /// serializes placement writes across all wines, which is fine at this
    /// scale but is a coarser guarantee than the per-wine independence the
    /// command layer itself provides.
    pub session: Arc<Mutex<CellarSession>>,
    /// Optional external suggestion generator. `None` means suggestions
    /// arrive as inline payloads only.
    pub provider: Option<Arc<dyn SuggestionProvider>>,
}

impl AppState {
    pub fn new(pool: vinoteca_db::DbPool, config: ServerConfig) -> Self {
        let session = CellarSession::with_history_depth(config.undo_history_depth);
        Self {
            pool,
            config: Arc::new(config),
            session: Arc::new(Mutex::new(session)),
            provider: None,
        }
    }

    pub fn with_provider(mut self, provider: Arc<dyn SuggestionProvider>) -> Self {
        self.provider = Some(provider);
        self
    }
}
