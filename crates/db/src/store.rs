//! Postgres-backed implementations of the core collaborator traits.

use pianoshop_core::access::RoleProvider;
use pianoshop_core::catalog::QuerySpec;
use pianoshop_core::featured::FeaturedPlan;
use pianoshop_core::listing::CatalogItem;
use pianoshop_core::store::{CatalogStore, FeaturedPatch, FeaturedTarget, StoreError};
use pianoshop_core::types::DbId;

use crate::repositories::{PianoRepo, UserRepo};
use crate::DbPool;

/// [`CatalogStore`] over the `pianos` table.
///
/// Featured plans are applied in a single transaction, so a failed save
/// leaves the previous featured set untouched.
#[derive(Debug, Clone)]
pub struct PgCatalogStore {
    pool: DbPool,
}

impl PgCatalogStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl CatalogStore for PgCatalogStore {
    async fn list_items(&self, query: &QuerySpec) -> Result<Vec<CatalogItem>, StoreError> {
        let rows = PianoRepo::list(&self.pool, query)
            .await
            .map_err(|e| StoreError::ReadFailed(e.to_string()))?;
        Ok(rows.into_iter().map(CatalogItem::from).collect())
    }

    async fn update_featured(
        &self,
        target: FeaturedTarget,
        patch: FeaturedPatch,
    ) -> Result<u64, StoreError> {
        PianoRepo::update_featured(&self.pool, target, patch)
            .await
            .map_err(|e| StoreError::WriteFailed(e.to_string()))
    }

    async fn apply_featured_plan(&self, plan: &FeaturedPlan) -> Result<(), StoreError> {
        PianoRepo::replace_featured(&self.pool, plan)
            .await
            .map_err(|e| StoreError::WriteFailed(e.to_string()))
    }
}

/// [`RoleProvider`] backed by the `users` and `roles` tables.
///
/// Lookup failures are logged and treated as "role not held".
#[derive(Debug, Clone)]
pub struct PgRoleProvider {
    pool: DbPool,
}

impl PgRoleProvider {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl RoleProvider for PgRoleProvider {
    async fn has_role(&self, user_id: DbId, role: &str) -> bool {
        match UserRepo::has_role(&self.pool, user_id, role).await {
            Ok(held) => held,
            Err(e) => {
                tracing::warn!(user_id, role, error = %e, "Role lookup failed");
                false
            }
        }
    }
}
