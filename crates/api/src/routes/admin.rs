//! Route definitions for the `/admin` namespace.

use axum::routing::get;
use axum::Router;

use crate::handlers::{enquiries, featured};
use crate::state::AppState;

/// Routes mounted at `/admin`. Every handler checks the elevated role.
///
/// ```text
/// GET /featured          -> featured::open
/// PUT /featured          -> featured::save
/// GET /contact-messages  -> list_contact_messages
/// GET /chat-leads        -> list_chat_leads
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/featured", get(featured::open).put(featured::save))
        .route("/contact-messages", get(enquiries::list_contact_messages))
        .route("/chat-leads", get(enquiries::list_chat_leads))
}
