//! JWT-based authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use waypost_core::error::CoreError;
use waypost_db::models::user::User;
use waypost_db::repositories::UserRepo;

use crate::auth::jwt::{validate_token, TokenKind};
use crate::error::AppError;
use crate::state::AppState;

/// Authenticated user extracted from a JWT Bearer token in the
/// `Authorization` header.
///
/// Token validation alone is not enough: the embedded user id is resolved
/// against the `users` table, so a token for a since-deleted user is
/// rejected with 401 rather than acting on a phantom identity.
///
/// Use this as an extractor parameter in any handler that requires
/// authentication:
///
/// ```ignore
/// async fn my_handler(auth: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = auth.user.id, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The authenticated user's full database row.
    pub user: User,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Missing Authorization header".into(),
                ))
            })?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid Authorization format. Expected: Bearer <token>".into(),
            ))
        })?;

        let user = resolve_bearer_user(state, token).await?;

        Ok(AuthUser { user })
    }
}

/// Resolve a bearer access token to a live user row.
///
/// Shared by the HTTP extractor above and the WebSocket handshake, so
/// both entry points apply the exact same gate.
pub async fn resolve_bearer_user(state: &AppState, token: &str) -> Result<User, AppError> {
    let claims = validate_token(token, TokenKind::Access, &state.config.jwt).map_err(|_| {
        AppError::Core(CoreError::Unauthorized("Invalid or expired token".into()))
    })?;

    // The user may have been deleted since the token was issued.
    UserRepo::find_by_id(&state.pool, claims.sub)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("User no longer exists".into())))
}
