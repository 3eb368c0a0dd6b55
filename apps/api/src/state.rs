use std::sync::Arc;

use crate::auth::{AccountStore, MemoryAccountStore};
use crate::config::Config;
use crate::engine::recommender::Recommender;
use crate::history::{HistoryStore, MemoryHistoryStore};

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Catalog + weights. Read-only, shared by every request.
    pub recommender: Arc<Recommender>,
    /// Pluggable history backend. Postgres when DATABASE_URL is set, memory otherwise.
    pub history: Arc<dyn HistoryStore>,
    pub accounts: Arc<dyn AccountStore>,
    pub config: Config,
}

impl AppState {
    /// State with process-local stores; nothing survives a restart.
    pub fn in_memory(recommender: Recommender, config: Config) -> Self {
        Self {
            recommender: Arc::new(recommender),
            history: Arc::new(MemoryHistoryStore::new()),
            accounts: Arc::new(MemoryAccountStore::new()),
            config,
        }
    }
}
