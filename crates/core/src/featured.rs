//! Featured piano curation for the home page.
//!
//! An admin picks up to [`FEATURED_CAPACITY`] listings in display order and
//! saves them as a unit. Saving always sweeps the previous featured set
//! before assigning positions `1..=n`, so re-running a save is safe.
//!
//! ```text
//! Closed --open--> Loading --> Ready --save--> Saving --> Closed
//!                                ^               |
//!                                +---failure-----+
//! Ready --close--> Closed
//! ```

use serde::Serialize;

use crate::access::Actor;
use crate::catalog::QuerySpec;
use crate::listing::CatalogItem;
use crate::notify::{Notice, NotificationSink};
use crate::store::{CatalogStore, FeaturedPatch, FeaturedTarget, StoreError};
use crate::types::DbId;

/// Number of featured slots on the home page.
pub const FEATURED_CAPACITY: usize = 4;

// ---------------------------------------------------------------------------
// Selection
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectionError {
    #[error("At most {capacity} pianos can be featured")]
    CapacityExceeded { capacity: usize },
}

/// The ids chosen for the home page, in display order, without duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FeaturedSelection {
    ids: Vec<DbId>,
}

impl FeaturedSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed from the listings that are featured right now, by position.
    pub fn seeded_from(items: &[CatalogItem]) -> Self {
        let mut featured: Vec<&CatalogItem> = items.iter().filter(|i| i.is_featured).collect();
        featured.sort_by_key(|i| (i.featured_order.unwrap_or(i32::MAX), i.id));

        let mut selection = Self::new();
        for item in featured.into_iter().take(FEATURED_CAPACITY) {
            if !selection.ids.contains(&item.id) {
                selection.ids.push(item.id);
            }
        }
        selection
    }

    /// Check or uncheck a listing.
    ///
    /// Checking appends to the end; checking an id that is already selected
    /// is a no-op. Unchecking removes the id wherever it is.
    pub fn select(&mut self, id: DbId, checked: bool) -> Result<(), SelectionError> {
        if !checked {
            self.ids.retain(|&existing| existing != id);
            return Ok(());
        }
        if self.ids.contains(&id) {
            return Ok(());
        }
        if self.is_full() {
            return Err(SelectionError::CapacityExceeded {
                capacity: FEATURED_CAPACITY,
            });
        }
        self.ids.push(id);
        Ok(())
    }

    pub fn ids(&self) -> &[DbId] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.ids.len() >= FEATURED_CAPACITY
    }

    pub fn contains(&self, id: DbId) -> bool {
        self.ids.contains(&id)
    }

    /// The writes that make this selection the featured set.
    pub fn plan(&self) -> FeaturedPlan {
        FeaturedPlan::for_selection(self)
    }
}

// ---------------------------------------------------------------------------
// Write plan
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "write", rename_all = "snake_case")]
pub enum PlannedWrite {
    /// Unfeature everything currently featured.
    Sweep,
    /// Feature `id` at position `order` (1-based).
    Assign { id: DbId, order: i32 },
}

impl PlannedWrite {
    pub fn as_update(&self) -> (FeaturedTarget, FeaturedPatch) {
        match *self {
            PlannedWrite::Sweep => (FeaturedTarget::AllFeatured, FeaturedPatch::cleared()),
            PlannedWrite::Assign { id, order } => {
                (FeaturedTarget::Item(id), FeaturedPatch::at(order))
            }
        }
    }
}

/// One sweep followed by one assignment per selected id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeaturedPlan {
    writes: Vec<PlannedWrite>,
}

impl FeaturedPlan {
    pub fn for_selection(selection: &FeaturedSelection) -> Self {
        let mut writes = Vec::with_capacity(selection.len() + 1);
        writes.push(PlannedWrite::Sweep);
        for (position, &id) in selection.ids().iter().enumerate() {
            writes.push(PlannedWrite::Assign {
                id,
                order: position as i32 + 1,
            });
        }
        Self { writes }
    }

    pub fn writes(&self) -> &[PlannedWrite] {
        &self.writes
    }

    /// `(id, order)` pairs in position order.
    pub fn assignments(&self) -> impl Iterator<Item = (DbId, i32)> + '_ {
        self.writes.iter().filter_map(|write| match *write {
            PlannedWrite::Assign { id, order } => Some((id, order)),
            PlannedWrite::Sweep => None,
        })
    }
}

// ---------------------------------------------------------------------------
// Curator
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CuratorState {
    Closed,
    Loading,
    Ready,
    Saving,
}

#[derive(Debug, thiserror::Error)]
pub enum CuratorError {
    #[error(transparent)]
    Rejected(#[from] SelectionError),

    #[error("Piano {0} is not in the catalog")]
    UnknownItem(DbId),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Curator is {actual:?}, expected {expected:?}")]
    InvalidState {
        expected: CuratorState,
        actual: CuratorState,
    },
}

/// One curation session: load, choose, save or cancel.
#[derive(Debug)]
pub struct Curator<S, N> {
    store: S,
    notifier: N,
    state: CuratorState,
    items: Vec<CatalogItem>,
    selection: FeaturedSelection,
}

impl<S: CatalogStore, N: NotificationSink> Curator<S, N> {
    /// Curation is only offered to elevated actors; everyone else gets `None`.
    pub fn for_actor(actor: &Actor, store: S, notifier: N) -> Option<Self> {
        if !actor.is_elevated() {
            return None;
        }
        Some(Self {
            store,
            notifier,
            state: CuratorState::Closed,
            items: Vec::new(),
            selection: FeaturedSelection::new(),
        })
    }

    pub fn state(&self) -> CuratorState {
        self.state
    }

    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    pub fn selection(&self) -> &FeaturedSelection {
        &self.selection
    }

    /// Load the catalog and seed the selection from the current featured set.
    ///
    /// On a load failure the error is reported, the dialog stays usable with
    /// an empty catalog and empty selection, and the error is returned.
    pub async fn open(&mut self) -> Result<(), CuratorError> {
        self.expect_state(CuratorState::Closed)?;
        self.state = CuratorState::Loading;

        match self.store.list_items(&QuerySpec::unfiltered()).await {
            Ok(items) => {
                self.selection = FeaturedSelection::seeded_from(&items);
                self.items = items;
                self.state = CuratorState::Ready;
                Ok(())
            }
            Err(err) => {
                self.items.clear();
                self.selection = FeaturedSelection::new();
                self.state = CuratorState::Ready;
                self.notifier
                    .notify(Notice::error("Could not load pianos", err.message()));
                Err(err.into())
            }
        }
    }

    /// Check or uncheck a loaded listing. Never touches the store.
    pub fn select(&mut self, id: DbId, checked: bool) -> Result<(), CuratorError> {
        self.expect_state(CuratorState::Ready)?;
        if checked && !self.items.iter().any(|item| item.id == id) {
            return Err(CuratorError::UnknownItem(id));
        }
        self.selection.select(id, checked).map_err(|err| {
            self.notifier
                .notify(Notice::error("Selection limit reached", err.to_string()));
            CuratorError::from(err)
        })
    }

    /// Persist the selection as the new featured set.
    ///
    /// On success `on_refresh` runs so dependent views can re-fetch, and the
    /// session closes. On failure the session returns to `Ready` with the
    /// selection intact so the save can be retried.
    pub async fn save<F: FnOnce()>(&mut self, on_refresh: F) -> Result<(), CuratorError> {
        self.expect_state(CuratorState::Ready)?;
        self.state = CuratorState::Saving;

        let plan = self.selection.plan();
        match self.store.apply_featured_plan(&plan).await {
            Ok(()) => {
                self.notifier.notify(Notice::success(
                    "Featured pianos updated",
                    format!("{} piano(s) featured", self.selection.len()),
                ));
                on_refresh();
                self.close();
                Ok(())
            }
            Err(err) => {
                self.state = CuratorState::Ready;
                self.notifier
                    .notify(Notice::error("Could not update featured pianos", err.message()));
                Err(err.into())
            }
        }
    }

    /// Discard the session without saving.
    pub fn close(&mut self) {
        self.state = CuratorState::Closed;
        self.items.clear();
        self.selection = FeaturedSelection::new();
    }

    fn expect_state(&self, expected: CuratorState) -> Result<(), CuratorError> {
        if self.state != expected {
            return Err(CuratorError::InvalidState {
                expected,
                actual: self.state,
            });
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
