use std::sync::Arc;

use pianoshop_db::store::{PgCatalogStore, PgRoleProvider};

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheap to clone: the pool is reference-counted and the config sits behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: pianoshop_db::DbPool,
    /// Server configuration (JWT settings, timeouts).
    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// Catalog store for the featured-items curator.
    pub fn catalog_store(&self) -> PgCatalogStore {
        PgCatalogStore::new(self.pool.clone())
    }

    /// Role lookups used to decide whether a session is elevated.
    pub fn role_provider(&self) -> PgRoleProvider {
        PgRoleProvider::new(self.pool.clone())
    }
}
