//! Handlers for the `/tokens` resource (refresh-token session listing
//! and revocation).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use waypost_core::error::CoreError;
use waypost_core::types::DbId;
use waypost_db::models::refresh_token::RefreshTokenResponse;
use waypost_db::repositories::RefreshTokenRepo;

use crate::error::{AppError, AppJson, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `DELETE /tokens` (logout by token value).
#[derive(Debug, Deserialize)]
pub struct RevokeTokenRequest {
    pub refresh_token: Option<String>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/tokens
///
/// List the caller's active sessions (refresh-token rows).
pub async fn list_tokens(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<DataResponse<Vec<RefreshTokenResponse>>>> {
    let tokens = RefreshTokenRepo::list_for_user(&state.pool, auth.user.id).await?;
    let responses: Vec<RefreshTokenResponse> =
        tokens.iter().map(RefreshTokenResponse::from).collect();

    Ok(Json(DataResponse { data: responses }))
}

/// DELETE /api/v1/tokens/{id}
///
/// Revoke one of the caller's sessions by row id.
pub async fn delete_token(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let token = RefreshTokenRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Token",
            id,
        }))?;

    if token.user_id != auth.user.id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Token belongs to another user".into(),
        )));
    }

    let removed = RefreshTokenRepo::delete(&state.pool, id).await?;
    if !removed {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Token",
            id,
        }));
    }

    tracing::info!(user_id = auth.user.id, token_id = id, "Session revoked");

    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/tokens
///
/// Revoke a session by refresh-token value (logout). The lookup is
/// scoped to the caller, and a miss is always 404: confirming that a
/// foreign token value exists would leak another user's credential.
pub async fn delete_token_by_value(
    State(state): State<AppState>,
    auth: AuthUser,
    AppJson(input): AppJson<RevokeTokenRequest>,
) -> AppResult<StatusCode> {
    let token = input
        .refresh_token
        .ok_or_else(|| AppError::BadRequest("Token is missing".into()))?;

    let removed = RefreshTokenRepo::delete_by_token(&state.pool, auth.user.id, &token).await?;
    if !removed {
        return Err(AppError::NotFound("Token not found".into()));
    }

    tracing::info!(user_id = auth.user.id, "Session revoked (logout)");

    Ok(StatusCode::NO_CONTENT)
}
