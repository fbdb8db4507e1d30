use axum::routing::post;
use axum::Router;

use crate::handlers::enquiries;
use crate::state::AppState;

/// Public submission routes, merged at the `/api/v1` root.
///
/// ```text
/// POST /contact     -> submit_contact
/// POST /chat-leads  -> submit_chat_lead
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/contact", post(enquiries::submit_contact))
        .route("/chat-leads", post(enquiries::submit_chat_lead))
}
