pub mod admin;
pub mod auth;
pub mod enquiries;
pub mod health;
pub mod pianos;
pub mod site;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /auth/login                      login (public)
/// /auth/refresh                    refresh (public)
/// /auth/logout                     logout (requires auth)
/// /auth/me                         profile + can_curate (requires auth)
///
/// /pianos                          list (public), create (admin)
/// /pianos/price-bounds             max price (public)
/// /pianos/facets                   distinct types/conditions (public)
/// /pianos/featured                 featured listings (public)
/// /pianos/{id}                     get (public), update, delete (admin)
///
/// /site/hero                       get (public), update (admin)
///
/// /contact                         contact form (public)
/// /chat-leads                      chat widget lead (public)
///
/// /admin/featured                  open curation, replace featured set
/// /admin/contact-messages          contact inbox
/// /admin/chat-leads                chat lead inbox
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/pianos", pianos::router())
        .nest("/site", site::router())
        .nest("/admin", admin::router())
        .merge(enquiries::router())
}
