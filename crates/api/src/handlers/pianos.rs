//! Handlers for the `/pianos` resource.
//!
//! The listing endpoint reads the same query keys the catalog page keeps in
//! its shareable URL (`category`, repeated `type` and `condition`, `minPrice`,
//! `maxPrice`), so a bookmarked catalog URL maps straight onto a request.

use axum::extract::{Path, RawQuery, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use pianoshop_core::catalog::{build_query, parse_criteria, parse_limit, FilterCriteria};
use pianoshop_core::error::CoreError;
use pianoshop_core::listing::{
    reconcile_key_image, resolve_key_image, validate_label, validate_name, validate_price,
};
use pianoshop_core::types::{DbId, Price};
use pianoshop_db::models::piano::{CreatePiano, Piano, UpdatePiano};
use pianoshop_db::repositories::PianoRepo;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::query::MAX_PAGE_SIZE;
use crate::response::DataResponse;
use crate::state::AppState;

/// A filtered catalog page, echoing the criteria that produced it.
#[derive(Debug, Serialize)]
pub struct CatalogPage {
    pub criteria: FilterCriteria,
    pub items: Vec<Piano>,
}

#[derive(Debug, Serialize)]
pub struct PriceBounds {
    /// `None` when the catalog is empty.
    pub max_price: Option<Price>,
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Piano", id })
}

// ---------------------------------------------------------------------------
// Public catalog
// ---------------------------------------------------------------------------

/// GET /api/v1/pianos?category=&type=&condition=&minPrice=&maxPrice=&limit=
///
/// Malformed filter and `limit` values are ignored rather than rejected.
pub async fn list(
    State(state): State<AppState>,
    RawQuery(raw): RawQuery,
) -> AppResult<impl IntoResponse> {
    let raw = raw.unwrap_or_default();
    let criteria = parse_criteria(&raw);
    let limit = parse_limit(&raw).map(|limit| limit.clamp(1, MAX_PAGE_SIZE));
    let query = build_query(&criteria).with_limit(limit);

    let items = PianoRepo::list(&state.pool, &query).await?;
    tracing::debug!(count = items.len(), unfiltered = query.is_unfiltered(), "Listed pianos");

    Ok(Json(DataResponse {
        data: CatalogPage { criteria, items },
    }))
}

/// GET /api/v1/pianos/price-bounds
///
/// Upper bound for the price range control. Independent of any active filter.
pub async fn price_bounds(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let max_price = PianoRepo::max_price(&state.pool).await?;
    Ok(Json(DataResponse {
        data: PriceBounds { max_price },
    }))
}

/// GET /api/v1/pianos/facets
pub async fn facets(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let facets = PianoRepo::facets(&state.pool).await?;
    Ok(Json(DataResponse { data: facets }))
}

/// GET /api/v1/pianos/featured
///
/// Featured pianos in display order. Only real listings are returned; the
/// home page does not pad the row with placeholders.
pub async fn featured(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let items = PianoRepo::list_featured(&state.pool).await?;
    Ok(Json(DataResponse { data: items }))
}

/// GET /api/v1/pianos/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let piano = PianoRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: piano }))
}

// ---------------------------------------------------------------------------
// Listing management (admin)
// ---------------------------------------------------------------------------

/// POST /api/v1/pianos
///
/// Create a listing owned by the caller. Without an explicit key image the
/// first image is used.
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Json(mut input): Json<CreatePiano>,
) -> AppResult<impl IntoResponse> {
    validate_name(&input.name)?;
    validate_label("type", &input.piano_type)?;
    validate_label("condition", &input.condition)?;
    validate_price(input.price)?;
    input.key_image = resolve_key_image(&input.images, input.key_image.as_deref())?;

    let piano = PianoRepo::create(&state.pool, admin.user_id, &input).await?;
    tracing::info!(piano_id = piano.id, user_id = admin.user_id, "Piano listed");

    Ok((StatusCode::CREATED, Json(DataResponse { data: piano })))
}

/// PUT /api/v1/pianos/{id}
///
/// Partial update. Replacing `images` keeps the key image when it is still
/// among them and otherwise falls back to the first image.
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdatePiano>,
) -> AppResult<impl IntoResponse> {
    if let Some(name) = &input.name {
        validate_name(name)?;
    }
    if let Some(piano_type) = &input.piano_type {
        validate_label("type", piano_type)?;
    }
    if let Some(condition) = &input.condition {
        validate_label("condition", condition)?;
    }
    if let Some(price) = input.price {
        validate_price(price)?;
    }

    let current = PianoRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;

    let images = input.images.as_deref().unwrap_or(&current.images);
    let key_image = match input.key_image.as_deref() {
        Some(requested) => resolve_key_image(images, Some(requested))?,
        None => reconcile_key_image(images, current.key_image.as_deref()),
    };

    let piano = PianoRepo::update(&state.pool, id, &input, key_image.as_deref())
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: piano }))
}

/// DELETE /api/v1/pianos/{id}
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if PianoRepo::delete(&state.pool, id).await? {
        tracing::info!(piano_id = id, user_id = admin.user_id, "Piano removed");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}
