//! Public setup/registration probe.
//!
//! Clients hit this before showing a login or onboarding screen: it
//! reveals whether an admin account exists yet and whether open
//! registration is enabled, and deliberately nothing else.

use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;
use waypost_db::repositories::{SettingRepo, UserRepo};

use crate::error::AppResult;
use crate::state::AppState;

/// Status response payload.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    /// Whether the first (admin) account has been created.
    pub is_setup: bool,
    /// Whether the `registration` setting is enabled.
    pub registration: bool,
}

/// GET /status -- public, unauthenticated.
async fn status(State(state): State<AppState>) -> AppResult<Json<StatusResponse>> {
    let is_setup = UserRepo::admin_exists(&state.pool).await?;

    let registration = SettingRepo::find_by_key(&state.pool, "registration")
        .await?
        .is_some_and(|setting| setting.value.eq_ignore_ascii_case("true"));

    Ok(Json(StatusResponse {
        is_setup,
        registration,
    }))
}

/// Mount the status route (relative to the `/api/v1` tree).
pub fn router() -> Router<AppState> {
    Router::new().route("/status", get(status))
}
