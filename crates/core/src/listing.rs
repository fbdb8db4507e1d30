//! Piano listing read model and the rules admin edits must satisfy.

use serde::Serialize;

use crate::catalog::Category;
use crate::error::CoreError;
use crate::types::{DbId, Price, Timestamp};

/// Maximum length of a listing name.
pub const MAX_NAME_LEN: usize = 200;

/// Maximum length of the free-text type and condition labels.
pub const MAX_LABEL_LEN: usize = 100;

/// A single piano listing as the catalog and curator see it.
///
/// When `is_featured` is true `featured_order` is a positive position;
/// otherwise it is `None`. `key_image` is either `None` or one of `images`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogItem {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub category: Category,
    #[serde(rename = "type")]
    pub piano_type: String,
    pub condition: String,
    pub price: Price,
    pub images: Vec<String>,
    pub key_image: Option<String>,
    pub is_featured: bool,
    pub featured_order: Option<i32>,
    pub owner_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl CatalogItem {
    /// Whether the featured flag and position agree with each other.
    pub fn featured_state_is_consistent(&self) -> bool {
        match (self.is_featured, self.featured_order) {
            (true, Some(order)) => order > 0,
            (false, None) => true,
            _ => false,
        }
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate a listing name (non-blank, at most [`MAX_NAME_LEN`] chars).
pub fn validate_name(name: &str) -> Result<(), CoreError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation("Name must not be empty".into()));
    }
    if trimmed.chars().count() > MAX_NAME_LEN {
        return Err(CoreError::Validation(format!(
            "Name must be at most {MAX_NAME_LEN} characters"
        )));
    }
    Ok(())
}

/// Validate a free-text label such as the piano type or condition.
pub fn validate_label(field: &str, value: &str) -> Result<(), CoreError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(format!("{field} must not be empty")));
    }
    if trimmed.chars().count() > MAX_LABEL_LEN {
        return Err(CoreError::Validation(format!(
            "{field} must be at most {MAX_LABEL_LEN} characters"
        )));
    }
    Ok(())
}

pub fn validate_price(price: Price) -> Result<(), CoreError> {
    if price.is_sign_negative() && !price.is_zero() {
        return Err(CoreError::Validation("Price must not be negative".into()));
    }
    Ok(())
}

/// Pick the key image for a listing being created.
///
/// An explicit choice must be one of `images`. Without one, the first image
/// is used, or `None` when there are no images.
pub fn resolve_key_image(
    images: &[String],
    requested: Option<&str>,
) -> Result<Option<String>, CoreError> {
    match requested {
        Some(key) if images.iter().any(|img| img == key) => Ok(Some(key.to_string())),
        Some(key) => Err(CoreError::Validation(format!(
            "Key image '{key}' is not one of the listing's images"
        ))),
        None => Ok(images.first().cloned()),
    }
}

/// Keep the current key image if it survived an edit to `images`, otherwise
/// fall back to the first remaining image.
pub fn reconcile_key_image(images: &[String], current: Option<&str>) -> Option<String> {
    match current {
        Some(key) if images.iter().any(|img| img == key) => Some(key.to_string()),
        _ => images.first().cloned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use rust_decimal::Decimal;

    fn images(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn blank_name_rejected() {
        assert_matches!(validate_name("   "), Err(CoreError::Validation(_)));
        assert!(validate_name("Steinway Model B").is_ok());
    }

    #[test]
    fn overlong_name_rejected() {
        let long = "x".repeat(MAX_NAME_LEN + 1);
        assert_matches!(validate_name(&long), Err(CoreError::Validation(_)));
    }

    #[test]
    fn label_names_field_in_message() {
        let err = validate_label("Condition", "").unwrap_err();
        assert!(err.to_string().contains("Condition"));
    }

    #[test]
    fn negative_price_rejected_zero_allowed() {
        assert!(validate_price(Decimal::ZERO).is_ok());
        assert_matches!(
            validate_price(Decimal::new(-1, 2)),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn key_image_must_belong_to_images() {
        let imgs = images(&["a.jpg", "b.jpg"]);
        assert_eq!(
            resolve_key_image(&imgs, Some("b.jpg")).unwrap(),
            Some("b.jpg".to_string())
        );
        assert_matches!(
            resolve_key_image(&imgs, Some("c.jpg")),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn key_image_defaults_to_first_or_none() {
        assert_eq!(
            resolve_key_image(&images(&["a.jpg", "b.jpg"]), None).unwrap(),
            Some("a.jpg".to_string())
        );
        assert_eq!(resolve_key_image(&[], None).unwrap(), None);
    }

    #[test]
    fn reconcile_drops_removed_key_image() {
        let imgs = images(&["b.jpg", "c.jpg"]);
        assert_eq!(reconcile_key_image(&imgs, Some("c.jpg")), Some("c.jpg".to_string()));
        assert_eq!(reconcile_key_image(&imgs, Some("a.jpg")), Some("b.jpg".to_string()));
        assert_eq!(reconcile_key_image(&[], Some("a.jpg")), None);
    }
}
