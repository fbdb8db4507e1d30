//! Handlers for site content (`/site`).

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use pianoshop_core::error::CoreError;
use pianoshop_db::models::hero::UpdateHeroBanner;
use pianoshop_db::repositories::HeroBannerRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

fn missing_banner() -> AppError {
    AppError::Core(CoreError::Internal("Hero banner row is missing".into()))
}

/// GET /api/v1/site/hero
pub async fn get_hero(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let banner = HeroBannerRepo::get(&state.pool)
        .await?
        .ok_or_else(missing_banner)?;
    Ok(Json(DataResponse { data: banner }))
}

/// PUT /api/v1/site/hero
///
/// Partial update of the home page banner.
pub async fn update_hero(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Json(input): Json<UpdateHeroBanner>,
) -> AppResult<impl IntoResponse> {
    if input.title.as_deref().is_some_and(|t| t.trim().is_empty()) {
        return Err(AppError::Core(CoreError::Validation(
            "Title must not be empty".into(),
        )));
    }

    let banner = HeroBannerRepo::update(&state.pool, &input, admin.user_id)
        .await?
        .ok_or_else(missing_banner)?;
    tracing::info!(user_id = admin.user_id, "Hero banner updated");

    Ok(Json(DataResponse { data: banner }))
}
