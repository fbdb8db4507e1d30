//! Route definitions for the `/pianos` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::pianos;
use crate::state::AppState;

/// Routes mounted at `/pianos`.
///
/// ```text
/// GET    /               -> list
/// POST   /               -> create (admin)
/// GET    /price-bounds   -> price_bounds
/// GET    /facets         -> facets
/// GET    /featured       -> featured
/// GET    /{id}           -> get_by_id
/// PUT    /{id}           -> update (admin)
/// DELETE /{id}           -> delete (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(pianos::list).post(pianos::create))
        .route("/price-bounds", get(pianos::price_bounds))
        .route("/facets", get(pianos::facets))
        .route("/featured", get(pianos::featured))
        .route(
            "/{id}",
            get(pianos::get_by_id)
                .put(pianos::update)
                .delete(pianos::delete),
        )
}
