//! Handlers for visitor enquiries: the contact form and the chat widget.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use pianoshop_core::enquiry::{
    validate_chat_lead, validate_contact, ChatLeadSubmission, ContactSubmission,
};
use pianoshop_db::repositories::{ChatLeadRepo, ContactMessageRepo};

use crate::error::AppResult;
use crate::middleware::rbac::RequireAdmin;
use crate::query::{clamp_limit, clamp_offset, PaginationParams, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Public submissions
// ---------------------------------------------------------------------------

/// POST /api/v1/contact
pub async fn submit_contact(
    State(state): State<AppState>,
    Json(input): Json<ContactSubmission>,
) -> AppResult<impl IntoResponse> {
    validate_contact(&input)?;
    let message = ContactMessageRepo::create(&state.pool, &input).await?;
    tracing::info!(message_id = message.id, "Contact message received");
    Ok((StatusCode::CREATED, Json(DataResponse { data: message })))
}

/// POST /api/v1/chat-leads
///
/// A lead needs an email address or a phone number.
pub async fn submit_chat_lead(
    State(state): State<AppState>,
    Json(input): Json<ChatLeadSubmission>,
) -> AppResult<impl IntoResponse> {
    validate_chat_lead(&input)?;
    let lead = ChatLeadRepo::create(&state.pool, &input).await?;
    tracing::info!(lead_id = lead.id, page = ?lead.page, "Chat lead captured");
    Ok((StatusCode::CREATED, Json(DataResponse { data: lead })))
}

// ---------------------------------------------------------------------------
// Admin inbox
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/contact-messages?limit=&offset=
pub async fn list_contact_messages(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(params): Query<PaginationParams>,
) -> AppResult<impl IntoResponse> {
    let limit = clamp_limit(params.limit, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE);
    let offset = clamp_offset(params.offset);
    let messages = ContactMessageRepo::list(&state.pool, limit, offset).await?;
    Ok(Json(DataResponse { data: messages }))
}

/// GET /api/v1/admin/chat-leads?limit=&offset=
pub async fn list_chat_leads(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(params): Query<PaginationParams>,
) -> AppResult<impl IntoResponse> {
    let limit = clamp_limit(params.limit, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE);
    let offset = clamp_offset(params.offset);
    let leads = ChatLeadRepo::list(&state.pool, limit, offset).await?;
    Ok(Json(DataResponse { data: leads }))
}
