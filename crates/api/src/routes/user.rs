//! Route definitions for the `/user` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::user;
use crate::state::AppState;

/// Routes mounted at `/user`.
///
/// ```text
/// GET   /  -> read_user
/// PATCH /  -> update_user
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(user::read_user).patch(user::update_user))
}
