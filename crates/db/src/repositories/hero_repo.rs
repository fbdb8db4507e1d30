//! Repository for the singleton `hero_banners` row.

use pianoshop_core::types::DbId;
use sqlx::PgPool;

use crate::models::hero::{HeroBanner, UpdateHeroBanner};

const COLUMNS: &str = "title, subtitle, image_url, cta_label, cta_href, updated_by, updated_at";

/// The home page banner. The row is seeded by migration and only ever updated.
pub struct HeroBannerRepo;

impl HeroBannerRepo {
    pub async fn get(pool: &PgPool) -> Result<Option<HeroBanner>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM hero_banners WHERE id = 1");
        sqlx::query_as::<_, HeroBanner>(&query)
            .fetch_optional(pool)
            .await
    }

    /// Apply an edit. Only non-`None` fields in `input` are written.
    ///
    /// Returns `None` if the banner row is missing.
    pub async fn update(
        pool: &PgPool,
        input: &UpdateHeroBanner,
        updated_by: DbId,
    ) -> Result<Option<HeroBanner>, sqlx::Error> {
        let query = format!(
            "UPDATE hero_banners SET \
                title = COALESCE($1, title), \
                subtitle = COALESCE($2, subtitle), \
                image_url = COALESCE($3, image_url), \
                cta_label = COALESCE($4, cta_label), \
                cta_href = COALESCE($5, cta_href), \
                updated_by = $6 \
             WHERE id = 1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, HeroBanner>(&query)
            .bind(input.title.as_deref().map(str::trim))
            .bind(&input.subtitle)
            .bind(&input.image_url)
            .bind(&input.cta_label)
            .bind(&input.cta_href)
            .bind(updated_by)
            .fetch_optional(pool)
            .await
    }
}
