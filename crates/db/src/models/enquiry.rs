//! Stored contact form messages and chat-widget leads.
//!
//! The create inputs are the validated submissions from
//! `pianoshop_core::enquiry`.

use pianoshop_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `contact_messages` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ContactMessage {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: Option<String>,
    pub message: String,
    pub created_at: Timestamp,
}

/// A row from the `chat_leads` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ChatLead {
    pub id: DbId,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub message: Option<String>,
    pub page: Option<String>,
    pub created_at: Timestamp,
}
