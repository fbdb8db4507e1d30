//! Record-store contract for catalog listings.
//!
//! The curator and the catalog view only ever talk to storage through
//! [`CatalogStore`]. Production uses the Postgres implementation in the db
//! crate; tests use in-memory fakes.

use std::future::Future;

use crate::catalog::QuerySpec;
use crate::featured::{FeaturedPlan, PlannedWrite};
use crate::listing::CatalogItem;
use crate::types::DbId;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("Store read failed: {0}")]
    ReadFailed(String),

    #[error("Store write failed: {0}")]
    WriteFailed(String),
}

impl StoreError {
    pub fn missing_listing(id: DbId) -> Self {
        StoreError::WriteFailed(format!("Piano {id} no longer exists"))
    }

    /// The message reported by the store, without the prefix.
    pub fn message(&self) -> &str {
        match self {
            StoreError::ReadFailed(msg) | StoreError::WriteFailed(msg) => msg,
        }
    }
}

/// Which rows a featured-flag update applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeaturedTarget {
    /// Every listing currently flagged as featured.
    AllFeatured,
    Item(DbId),
}

/// New values for `is_featured` / `featured_order`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeaturedPatch {
    pub is_featured: bool,
    pub featured_order: Option<i32>,
}

impl FeaturedPatch {
    pub fn cleared() -> Self {
        Self {
            is_featured: false,
            featured_order: None,
        }
    }

    pub fn at(order: i32) -> Self {
        Self {
            is_featured: true,
            featured_order: Some(order),
        }
    }
}

pub trait CatalogStore: Send + Sync {
    /// List listings matching `query`.
    fn list_items(
        &self,
        query: &QuerySpec,
    ) -> impl Future<Output = Result<Vec<CatalogItem>, StoreError>> + Send;

    /// Apply `patch` to the rows selected by `target`, returning the number
    /// of rows changed.
    fn update_featured(
        &self,
        target: FeaturedTarget,
        patch: FeaturedPatch,
    ) -> impl Future<Output = Result<u64, StoreError>> + Send;

    /// Replace the featured set according to `plan`.
    ///
    /// An assignment that matches no listing is a write failure, since it
    /// would leave a gap in the display order.
    ///
    /// The default issues each write as an independent update and stops at
    /// the first failure; writes already applied stay applied. Stores with
    /// transactions should override this to apply the plan atomically.
    fn apply_featured_plan(
        &self,
        plan: &FeaturedPlan,
    ) -> impl Future<Output = Result<(), StoreError>> + Send {
        async move {
            for write in plan.writes() {
                let (target, patch) = write.as_update();
                let changed = self.update_featured(target, patch).await?;
                if let PlannedWrite::Assign { id, .. } = write {
                    if changed == 0 {
                        return Err(StoreError::missing_listing(*id));
                    }
                }
            }
            Ok(())
        }
    }
}
