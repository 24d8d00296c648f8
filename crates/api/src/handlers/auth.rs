//! Handlers for the `/auth` resource (register, login, refresh).

use axum::extract::State;
use axum::http::header::USER_AGENT;
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use serde::{Deserialize, Serialize};
use waypost_core::error::CoreError;
use waypost_db::models::refresh_token::CreateRefreshToken;
use waypost_db::models::user::{CreateUser, User, UserResponse};
use waypost_db::repositories::{RefreshTokenRepo, UserRepo};

use crate::auth::jwt::{generate_token, validate_token, TokenKind};
use crate::auth::password::{hash_password, verify_password};
use crate::error::{AppError, AppJson, AppResult};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/register`.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Request body for `POST /auth/refresh`.
#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: Option<String>,
}

/// Successful authentication response returned by register and login.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub user: UserResponse,
    pub access_token: String,
    pub refresh_token: String,
}

/// Response body for `POST /auth/refresh`.
#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    pub access_token: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/register
///
/// Create an account. The first account ever registered becomes the
/// admin; every later registration is a regular user no matter what the
/// payload claims. Returns both tokens alongside the sanitized user.
pub async fn register(
    State(state): State<AppState>,
    headers: HeaderMap,
    AppJson(input): AppJson<RegisterRequest>,
) -> AppResult<(StatusCode, Json<AuthResponse>)> {
    if input.username.is_empty() || input.password.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Username and password fields are required".into(),
        )));
    }

    if UserRepo::find_by_username(&state.pool, &input.username)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::Conflict(
            "Username already taken".into(),
        )));
    }

    // The first registered user is promoted to admin.
    let admin = !UserRepo::admin_exists(&state.pool).await?;

    let hashed = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let create_dto = CreateUser {
        username: input.username,
        password_hash: hashed,
        admin,
    };
    let user = UserRepo::create(&state.pool, &create_dto).await?;

    tracing::info!(user_id = user.id, admin, "User registered");

    let response = issue_session(&state, &user, &headers).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// POST /api/v1/auth/login
///
/// Authenticate with username + password. An unknown username and a
/// wrong password produce the identical 401 so usernames cannot be
/// enumerated.
pub async fn login(
    State(state): State<AppState>,
    headers: HeaderMap,
    AppJson(input): AppJson<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let user = UserRepo::find_by_username(&state.pool, &input.username)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("Invalid credentials".into())))?;

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;

    if !password_valid {
        return Err(AppError::Core(CoreError::Unauthorized(
            "Invalid credentials".into(),
        )));
    }

    tracing::info!(user_id = user.id, "User logged in");

    let response = issue_session(&state, &user, &headers).await?;
    Ok(Json(response))
}

/// POST /api/v1/auth/refresh
///
/// Exchange a persisted refresh token for a new access token. The
/// refresh token itself is not rotated. Its `updated_at` is touched only
/// after the signature and expiry have verified, so the column records
/// the last successful exchange.
pub async fn refresh(
    State(state): State<AppState>,
    AppJson(input): AppJson<RefreshRequest>,
) -> AppResult<Json<RefreshResponse>> {
    let token = input
        .refresh_token
        .ok_or_else(|| AppError::BadRequest("Refresh token is required".into()))?;

    let record = RefreshTokenRepo::find_by_token(&state.pool, &token)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Forbidden("Invalid refresh token".into())))?;

    validate_token(&token, TokenKind::Refresh, &state.config.jwt)
        .map_err(|_| AppError::Core(CoreError::Forbidden("Invalid refresh token".into())))?;

    RefreshTokenRepo::touch(&state.pool, record.id).await?;

    let access_token = generate_token(record.user_id, TokenKind::Access, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    Ok(Json(RefreshResponse { access_token }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Generate both tokens, persist the refresh token keyed by the client's
/// `User-Agent`, and build the response.
async fn issue_session(
    state: &AppState,
    user: &User,
    headers: &HeaderMap,
) -> AppResult<AuthResponse> {
    let access_token = generate_token(user.id, TokenKind::Access, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    let refresh_token = generate_token(user.id, TokenKind::Refresh, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    let agent = headers
        .get(USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);

    let create_dto = CreateRefreshToken {
        token: refresh_token.clone(),
        user_id: user.id,
        agent,
    };
    RefreshTokenRepo::create(&state.pool, &create_dto).await?;

    Ok(AuthResponse {
        user: UserResponse::from(user),
        access_token,
        refresh_token,
    })
}
