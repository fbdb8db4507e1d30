//! Repositories for `contact_messages` and `chat_leads`.

use pianoshop_core::enquiry::{ChatLeadSubmission, ContactSubmission};
use sqlx::PgPool;

use crate::models::enquiry::{ChatLead, ContactMessage};

const CONTACT_COLUMNS: &str = "id, name, email, phone, subject, message, created_at";
const LEAD_COLUMNS: &str = "id, name, email, phone, message, page, created_at";

/// Trim and drop blank optional text.
fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

pub struct ContactMessageRepo;

impl ContactMessageRepo {
    /// Store a validated contact form submission.
    pub async fn create(
        pool: &PgPool,
        input: &ContactSubmission,
    ) -> Result<ContactMessage, sqlx::Error> {
        let query = format!(
            "INSERT INTO contact_messages (name, email, phone, subject, message)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {CONTACT_COLUMNS}"
        );
        sqlx::query_as::<_, ContactMessage>(&query)
            .bind(input.name.trim())
            .bind(input.email.trim())
            .bind(non_blank(input.phone.as_deref()))
            .bind(non_blank(input.subject.as_deref()))
            .bind(input.message.trim())
            .fetch_one(pool)
            .await
    }

    /// Newest first.
    pub async fn list(
        pool: &PgPool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ContactMessage>, sqlx::Error> {
        let query = format!(
            "SELECT {CONTACT_COLUMNS} FROM contact_messages
             ORDER BY created_at DESC, id DESC
             LIMIT $1 OFFSET $2"
        );
        sqlx::query_as::<_, ContactMessage>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }
}

pub struct ChatLeadRepo;

impl ChatLeadRepo {
    /// Store a validated chat-widget lead.
    pub async fn create(pool: &PgPool, input: &ChatLeadSubmission) -> Result<ChatLead, sqlx::Error> {
        let query = format!(
            "INSERT INTO chat_leads (name, email, phone, message, page)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {LEAD_COLUMNS}"
        );
        sqlx::query_as::<_, ChatLead>(&query)
            .bind(input.name.trim())
            .bind(non_blank(input.email.as_deref()))
            .bind(non_blank(input.phone.as_deref()))
            .bind(non_blank(input.message.as_deref()))
            .bind(non_blank(input.page.as_deref()))
            .fetch_one(pool)
            .await
    }

    /// Newest first.
    pub async fn list(pool: &PgPool, limit: i64, offset: i64) -> Result<Vec<ChatLead>, sqlx::Error> {
        let query = format!(
            "SELECT {LEAD_COLUMNS} FROM chat_leads
             ORDER BY created_at DESC, id DESC
             LIMIT $1 OFFSET $2"
        );
        sqlx::query_as::<_, ChatLead>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }
}
