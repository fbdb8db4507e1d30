//! Visitor enquiries: the contact form and the floating chat widget.

use serde::{Deserialize, Deserializer};
use validator::Validate;

use crate::error::CoreError;

/// Deserialize optional text, treating a blank string as absent.
fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(non_blank(value))
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// A contact form submission.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ContactSubmission {
    #[validate(length(min = 1, max = 120))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[serde(default, deserialize_with = "blank_as_none")]
    #[validate(length(max = 40))]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    #[validate(length(max = 200))]
    pub subject: Option<String>,
    #[validate(length(min = 1, max = 5000))]
    pub message: String,
}

/// A lead captured by the chat widget. Needs at least one way to reply.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ChatLeadSubmission {
    #[validate(length(min = 1, max = 120))]
    pub name: String,
    #[serde(default, deserialize_with = "blank_as_none")]
    #[validate(email)]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    #[validate(length(max = 40))]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    #[validate(length(max = 2000))]
    pub message: Option<String>,
    /// Page the widget was opened on.
    #[serde(default, deserialize_with = "blank_as_none")]
    #[validate(length(max = 500))]
    pub page: Option<String>,
}

impl ChatLeadSubmission {
    /// Copy with blank optional fields dropped.
    pub fn normalized(&self) -> Self {
        Self {
            name: self.name.clone(),
            email: non_blank(self.email.clone()),
            phone: non_blank(self.phone.clone()),
            message: non_blank(self.message.clone()),
            page: non_blank(self.page.clone()),
        }
    }
}

pub fn validate_contact(input: &ContactSubmission) -> Result<(), CoreError> {
    input.validate()?;
    if input.name.trim().is_empty() || input.message.trim().is_empty() {
        return Err(CoreError::Validation(
            "Name and message must not be blank".into(),
        ));
    }
    Ok(())
}

/// Blank optional fields count as not given.
pub fn validate_chat_lead(input: &ChatLeadSubmission) -> Result<(), CoreError> {
    let input = input.normalized();
    input.validate()?;
    if input.name.trim().is_empty() {
        return Err(CoreError::Validation("Name must not be blank".into()));
    }
    if input.email.is_none() && input.phone.is_none() {
        return Err(CoreError::Validation(
            "Provide an email address or a phone number".into(),
        ));
    }
    Ok(())
}
