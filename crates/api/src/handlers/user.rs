//! Handlers for the `/user` resource (the caller's own account).

use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use waypost_core::error::CoreError;
use waypost_db::models::user::{UpdateUser, UserResponse};
use waypost_db::repositories::UserRepo;

use crate::auth::password::hash_password;
use crate::error::{AppError, AppJson, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `PATCH /user`. Only the listed fields are mutable;
/// anything else in the payload is rejected.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateUserRequest {
    pub username: Option<String>,
    pub password: Option<String>,
    pub admin: Option<bool>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/user
///
/// The authenticated user's own account, sanitized.
pub async fn read_user(auth: AuthUser) -> Json<DataResponse<UserResponse>> {
    Json(DataResponse {
        data: UserResponse::from(&auth.user),
    })
}

/// PATCH /api/v1/user
///
/// Update the caller's account. Changing the admin flag requires the
/// caller to already be an admin.
pub async fn update_user(
    State(state): State<AppState>,
    auth: AuthUser,
    AppJson(input): AppJson<UpdateUserRequest>,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    if let Some(username) = &input.username {
        if username.is_empty() {
            return Err(AppError::Core(CoreError::Validation(
                "Username must not be empty".into(),
            )));
        }
        if *username != auth.user.username
            && UserRepo::find_by_username(&state.pool, username)
                .await?
                .is_some()
        {
            return Err(AppError::Core(CoreError::Conflict(
                "Username already taken".into(),
            )));
        }
    }

    if input.admin.is_some() && !auth.user.admin {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only admins may change the admin flag".into(),
        )));
    }

    let password_hash = match &input.password {
        Some(password) if password.is_empty() => {
            return Err(AppError::Core(CoreError::Validation(
                "Password must not be empty".into(),
            )));
        }
        Some(password) => Some(
            hash_password(password)
                .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?,
        ),
        None => None,
    };

    let update_dto = UpdateUser {
        username: input.username,
        password_hash,
        admin: input.admin,
    };
    let updated = UserRepo::update(&state.pool, auth.user.id, &update_dto)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: auth.user.id,
        }))?;

    tracing::info!(user_id = updated.id, "User account updated");

    Ok(Json(DataResponse {
        data: UserResponse::from(&updated),
    }))
}
