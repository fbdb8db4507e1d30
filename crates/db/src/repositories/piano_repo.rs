//! Repository for the `pianos` table.

use pianoshop_core::catalog::{Direction, Field, Predicate, QuerySpec};
use pianoshop_core::featured::{FeaturedPlan, PlannedWrite};
use pianoshop_core::store::{FeaturedPatch, FeaturedTarget};
use pianoshop_core::types::{DbId, Price};
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::models::piano::{CreatePiano, Piano, PianoFacets, UpdatePiano};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, description, category, piano_type, condition, price, \
    images, key_image, is_featured, featured_order, owner_id, created_at, updated_at";

/// Map a catalog field onto its column.
fn column(field: Field) -> &'static str {
    match field {
        Field::Category => "category",
        Field::Type => "piano_type",
        Field::Condition => "condition",
        Field::Price => "price",
        Field::CreatedAt => "created_at",
    }
}

/// Append `WHERE ... AND ...` for each predicate.
fn push_predicates(builder: &mut QueryBuilder<'_, Postgres>, predicates: &[Predicate]) {
    for (i, predicate) in predicates.iter().enumerate() {
        builder.push(if i == 0 { " WHERE " } else { " AND " });
        match predicate {
            Predicate::Eq { field, value } => {
                builder.push(column(*field)).push(" = ").push_bind(value.clone());
            }
            Predicate::In { field, values } => {
                let values: Vec<String> = values.iter().cloned().collect();
                builder
                    .push(column(*field))
                    .push(" = ANY(")
                    .push_bind(values)
                    .push(")");
            }
            Predicate::Range { field, min, max } => match (min, max) {
                (Some(min), Some(max)) => {
                    builder
                        .push(column(*field))
                        .push(" BETWEEN ")
                        .push_bind(*min)
                        .push(" AND ")
                        .push_bind(*max);
                }
                (Some(min), None) => {
                    builder.push(column(*field)).push(" >= ").push_bind(*min);
                }
                (None, Some(max)) => {
                    builder.push(column(*field)).push(" <= ").push_bind(*max);
                }
                (None, None) => {
                    builder.push("TRUE");
                }
            },
        }
    }
}

/// Provides CRUD, filtered listing, and featured-set operations for pianos.
pub struct PianoRepo;

impl PianoRepo {
    /// Insert a new listing owned by `owner_id`.
    ///
    /// `input.key_image` must already be resolved against `input.images`.
    pub async fn create(
        pool: &PgPool,
        owner_id: DbId,
        input: &CreatePiano,
    ) -> Result<Piano, sqlx::Error> {
        let query = format!(
            "INSERT INTO pianos \
                (name, description, category, piano_type, condition, price, images, key_image, owner_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Piano>(&query)
            .bind(input.name.trim())
            .bind(&input.description)
            .bind(input.category.as_str())
            .bind(input.piano_type.trim())
            .bind(input.condition.trim())
            .bind(input.price)
            .bind(&input.images)
            .bind(&input.key_image)
            .bind(owner_id)
            .fetch_one(pool)
            .await
    }

    /// Find a listing by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Piano>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM pianos WHERE id = $1");
        sqlx::query_as::<_, Piano>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List listings matching a catalog query.
    ///
    /// Ties in the requested order are broken by id, newest first.
    pub async fn list(pool: &PgPool, query: &QuerySpec) -> Result<Vec<Piano>, sqlx::Error> {
        let mut builder = QueryBuilder::<Postgres>::new(format!("SELECT {COLUMNS} FROM pianos"));
        push_predicates(&mut builder, &query.predicates);

        builder
            .push(" ORDER BY ")
            .push(column(query.order.field))
            .push(match query.order.direction {
                Direction::Asc => " ASC",
                Direction::Desc => " DESC",
            })
            .push(", id DESC");

        if let Some(limit) = query.limit {
            builder.push(" LIMIT ").push_bind(limit);
        }

        builder.build_query_as::<Piano>().fetch_all(pool).await
    }

    /// The featured listings in display order.
    pub async fn list_featured(pool: &PgPool) -> Result<Vec<Piano>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM pianos \
             WHERE is_featured = true \
             ORDER BY featured_order ASC, id ASC"
        );
        sqlx::query_as::<_, Piano>(&query).fetch_all(pool).await
    }

    /// Highest listed price, or `None` for an empty catalog.
    pub async fn max_price(pool: &PgPool) -> Result<Option<Price>, sqlx::Error> {
        sqlx::query_scalar::<_, Option<Price>>("SELECT MAX(price) FROM pianos")
            .fetch_one(pool)
            .await
    }

    /// Distinct types and conditions, alphabetically.
    pub async fn facets(pool: &PgPool) -> Result<PianoFacets, sqlx::Error> {
        let types = sqlx::query_scalar::<_, String>(
            "SELECT DISTINCT piano_type FROM pianos ORDER BY piano_type",
        )
        .fetch_all(pool)
        .await?;
        let conditions = sqlx::query_scalar::<_, String>(
            "SELECT DISTINCT condition FROM pianos ORDER BY condition",
        )
        .fetch_all(pool)
        .await?;
        Ok(PianoFacets { types, conditions })
    }

    /// Update a listing. Only non-`None` fields in `input` are applied;
    /// `key_image` is always written and must already be reconciled with the
    /// resulting image list.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdatePiano,
        key_image: Option<&str>,
    ) -> Result<Option<Piano>, sqlx::Error> {
        let query = format!(
            "UPDATE pianos SET \
                name = COALESCE($2, name), \
                description = COALESCE($3, description), \
                category = COALESCE($4, category), \
                piano_type = COALESCE($5, piano_type), \
                condition = COALESCE($6, condition), \
                price = COALESCE($7, price), \
                images = COALESCE($8, images), \
                key_image = $9 \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Piano>(&query)
            .bind(id)
            .bind(input.name.as_deref().map(str::trim))
            .bind(&input.description)
            .bind(input.category.map(|c| c.as_str()))
            .bind(input.piano_type.as_deref().map(str::trim))
            .bind(input.condition.as_deref().map(str::trim))
            .bind(input.price)
            .bind(&input.images)
            .bind(key_image)
            .fetch_optional(pool)
            .await
    }

    /// Delete a listing. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM pianos WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // -----------------------------------------------------------------------
    // Featured set
    // -----------------------------------------------------------------------

    /// Apply a single featured-flag update. Returns the number of rows changed.
    pub async fn update_featured(
        pool: &PgPool,
        target: FeaturedTarget,
        patch: FeaturedPatch,
    ) -> Result<u64, sqlx::Error> {
        let result = Self::featured_update_query(target, patch).execute(pool).await?;
        Ok(result.rows_affected())
    }

    /// Apply a whole featured plan inside one transaction.
    ///
    /// Fails with [`sqlx::Error::RowNotFound`] and rolls back if any assigned
    /// piano no longer exists.
    pub async fn replace_featured(pool: &PgPool, plan: &FeaturedPlan) -> Result<(), sqlx::Error> {
        let mut tx = pool.begin().await?;

        for write in plan.writes() {
            let (target, patch) = write.as_update();
            let result = Self::featured_update_query(target, patch)
                .execute(&mut *tx)
                .await?;
            if let PlannedWrite::Assign { id, .. } = write {
                if result.rows_affected() == 0 {
                    tracing::warn!(piano_id = id, "Featured piano no longer exists");
                    return Err(sqlx::Error::RowNotFound);
                }
            }
        }

        tx.commit().await?;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Internal helpers
    // -----------------------------------------------------------------------

    fn featured_update_query(
        target: FeaturedTarget,
        patch: FeaturedPatch,
    ) -> sqlx::query::Query<'static, Postgres, sqlx::postgres::PgArguments> {
        match target {
            FeaturedTarget::AllFeatured => sqlx::query(
                "UPDATE pianos SET is_featured = $1, featured_order = $2 \
                 WHERE is_featured = true",
            )
            .bind(patch.is_featured)
            .bind(patch.featured_order),
            FeaturedTarget::Item(id) => sqlx::query(
                "UPDATE pianos SET is_featured = $1, featured_order = $2 \
                 WHERE id = $3",
            )
            .bind(patch.is_featured)
            .bind(patch.featured_order)
            .bind(id),
        }
    }
}
