//! Home page hero banner.

use pianoshop_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// The single row of the `hero_banners` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct HeroBanner {
    pub title: String,
    pub subtitle: Option<String>,
    pub image_url: Option<String>,
    pub cta_label: Option<String>,
    pub cta_href: Option<String>,
    pub updated_by: Option<DbId>,
    pub updated_at: Timestamp,
}

/// DTO for editing the banner. Only non-`None` fields are applied.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateHeroBanner {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub image_url: Option<String>,
    pub cta_label: Option<String>,
    pub cta_href: Option<String>,
}
