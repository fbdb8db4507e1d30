//! Handlers for featured-item curation (`/admin/featured`).
//!
//! Each request runs one curator session against the Postgres store: `GET`
//! opens it to show the current state, `PUT` opens it, applies the requested
//! selection in order and saves.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use pianoshop_core::access::resolve_actor;
use pianoshop_core::error::CoreError;
use pianoshop_core::featured::{Curator, FEATURED_CAPACITY};
use pianoshop_core::listing::CatalogItem;
use pianoshop_core::notify::Notice;
use pianoshop_core::types::DbId;
use pianoshop_db::models::piano::Piano;
use pianoshop_db::repositories::PianoRepo;
use pianoshop_db::store::PgCatalogStore;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::notifications::TracingNotifier;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `PUT /admin/featured`.
#[derive(Debug, Deserialize)]
pub struct SetFeaturedRequest {
    /// Listings to feature, in display order.
    pub piano_ids: Vec<DbId>,
}

/// What the curation dialog needs to render.
#[derive(Debug, Serialize)]
pub struct CurationView {
    pub items: Vec<CatalogItem>,
    /// Currently featured ids in display order.
    pub selection: Vec<DbId>,
    pub capacity: usize,
}

/// Result of a successful save.
#[derive(Debug, Serialize)]
pub struct FeaturedSaved {
    pub featured: Vec<Piano>,
    pub notices: Vec<Notice>,
}

type PgCurator = Curator<PgCatalogStore, Arc<TracingNotifier>>;

/// Start a curator session for the caller, or refuse with 403.
async fn curator_for(
    state: &AppState,
    user: &AuthUser,
) -> AppResult<(PgCurator, Arc<TracingNotifier>)> {
    let actor = resolve_actor(Some(&user.session()), &state.role_provider()).await;
    let notifier = Arc::new(TracingNotifier::new());
    let curator = Curator::for_actor(&actor, state.catalog_store(), Arc::clone(&notifier))
        .ok_or_else(|| {
            AppError::Core(CoreError::Forbidden(
                "Featured curation requires the admin role".into(),
            ))
        })?;
    Ok((curator, notifier))
}

/// GET /api/v1/admin/featured
///
/// All listings plus the selection seeded from the current featured set.
pub async fn open(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<DataResponse<CurationView>>> {
    let (mut curator, _notifier) = curator_for(&state, &user).await?;
    curator.open().await?;

    Ok(Json(DataResponse {
        data: CurationView {
            items: curator.items().to_vec(),
            selection: curator.selection().ids().to_vec(),
            capacity: FEATURED_CAPACITY,
        },
    }))
}

/// PUT /api/v1/admin/featured
///
/// Replace the featured set with `piano_ids`, positions assigned from 1 in
/// the given order. More than the capacity is rejected with 422 before
/// anything is written; an id that is not a listing is rejected with 400.
pub async fn save(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<SetFeaturedRequest>,
) -> AppResult<Json<DataResponse<FeaturedSaved>>> {
    let (mut curator, notifier) = curator_for(&state, &user).await?;
    curator.open().await?;

    // Start from an empty selection so the request fully defines the new order.
    let seeded: Vec<DbId> = curator.selection().ids().to_vec();
    for id in seeded {
        curator.select(id, false)?;
    }
    for id in input.piano_ids {
        curator.select(id, true)?;
    }

    let mut refreshed = false;
    curator.save(|| refreshed = true).await?;
    tracing::info!(user_id = user.user_id, refreshed, "Featured set replaced");

    let featured = PianoRepo::list_featured(&state.pool).await?;
    Ok(Json(DataResponse {
        data: FeaturedSaved {
            featured,
            notices: notifier.take(),
        },
    }))
}
