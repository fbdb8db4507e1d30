use axum::routing::get;
use axum::Router;

use crate::handlers::site;
use crate::state::AppState;

/// Routes mounted at `/site`.
///
/// ```text
/// GET /hero  -> get_hero
/// PUT /hero  -> update_hero (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/hero", get(site::get_hero).put(site::update_hero))
}
