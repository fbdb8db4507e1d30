//! Role-based access control extractor.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use pianoshop_core::access::resolve_actor;
use pianoshop_core::error::CoreError;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Requires the elevated (`admin`) role. Rejects with 403 Forbidden otherwise.
///
/// Membership is resolved through the role provider on every request rather
/// than trusted from the token, so a demoted user loses access immediately.
///
/// ```ignore
/// async fn admin_only(RequireAdmin(user): RequireAdmin) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        let actor = resolve_actor(Some(&user.session()), &state.role_provider()).await;
        if !actor.is_elevated() {
            return Err(AppError::Core(CoreError::Forbidden(
                "Admin role required".into(),
            )));
        }
        Ok(RequireAdmin(user))
    }
}

