//! Piano listing entity model and DTOs.

use pianoshop_core::catalog::Category;
use pianoshop_core::listing::CatalogItem;
use pianoshop_core::types::{DbId, Price, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `pianos` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Piano {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    #[sqlx(try_from = "String")]
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

impl From<Piano> for CatalogItem {
    fn from(row: Piano) -> Self {
        CatalogItem {
            id: row.id,
            name: row.name,
            description: row.description,
            category: row.category,
            piano_type: row.piano_type,
            condition: row.condition,
            price: row.price,
            images: row.images,
            key_image: row.key_image,
            is_featured: row.is_featured,
            featured_order: row.featured_order,
            owner_id: row.owner_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// DTO for creating a listing. The owner comes from the session, not the body.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePiano {
    pub name: String,
    pub description: Option<String>,
    pub category: Category,
    #[serde(rename = "type")]
    pub piano_type: String,
    pub condition: String,
    pub price: Price,
    #[serde(default)]
    pub images: Vec<String>,
    pub key_image: Option<String>,
}

/// DTO for updating a listing. Featured state and owner are not editable here.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdatePiano {
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<Category>,
    #[serde(rename = "type")]
    pub piano_type: Option<String>,
    pub condition: Option<String>,
    pub price: Option<Price>,
    /// If `Some`, replaces the whole image list.
    pub images: Option<Vec<String>>,
    pub key_image: Option<String>,
}

/// Distinct filter values currently present in the catalog.
#[derive(Debug, Clone, Serialize)]
pub struct PianoFacets {
    pub types: Vec<String>,
    pub conditions: Vec<String>,
}
