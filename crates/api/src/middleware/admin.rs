//! Admin-gated extractor.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use waypost_core::error::CoreError;
use waypost_db::models::user::User;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Requires the authenticated user to carry the admin flag. Rejects with
/// 403 Forbidden otherwise.
///
/// ```ignore
/// async fn admin_only(RequireAdmin(user): RequireAdmin) -> AppResult<Json<()>> {
///     // user is guaranteed to be an admin here
///     Ok(Json(()))
/// }
/// ```
pub struct RequireAdmin(pub User);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth = AuthUser::from_request_parts(parts, state).await?;
        if !auth.user.admin {
            return Err(AppError::Core(CoreError::Forbidden(
                "Admin privileges required".into(),
            )));
        }
        Ok(RequireAdmin(auth.user))
    }
}
