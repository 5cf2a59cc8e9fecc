use std::sync::Arc;

use beatsmith_db::stores::{PgLoglineStore, PgStoryPlanStore};

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: beatsmith_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(pool: beatsmith_db::DbPool, config: ServerConfig) -> Self {
        Self {
            pool,
            config: Arc::new(config),
        }
    }

    /// Slug store for logline creation.
    pub fn logline_store(&self) -> PgLoglineStore {
        PgLoglineStore::new(self.pool.clone())
    }

    /// Slug store for story plan creation.
    pub fn story_plan_store(&self) -> PgStoryPlanStore {
        PgStoryPlanStore::new(self.pool.clone())
    }
}
