//! Route definitions for the `/settings` resource.
//!
//! Reads require any authenticated user; writes require admin (enforced
//! by the handlers via `RequireAdmin`).

use axum::routing::get;
use axum::Router;

use crate::handlers::settings;
use crate::state::AppState;

/// Routes mounted at `/settings`.
///
/// ```text
/// POST   /      -> create_setting (admin)
/// GET    /      -> list_settings
/// GET    /{id}  -> get_setting
/// PATCH  /{id}  -> update_setting (admin)
/// DELETE /{id}  -> delete_setting (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(settings::list_settings).post(settings::create_setting),
        )
        .route(
            "/{id}",
            get(settings::get_setting)
                .patch(settings::update_setting)
                .delete(settings::delete_setting),
        )
}
