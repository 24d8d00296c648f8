//! Route definitions for the `/devices` resource.
//!
//! All endpoints require authentication; single-device routes are
//! additionally ownership-checked in their handlers.

use axum::routing::get;
use axum::Router;

use crate::handlers::devices;
use crate::state::AppState;

/// Routes mounted at `/devices`.
///
/// ```text
/// POST   /      -> create_device
/// GET    /      -> list_devices (?latest_locations=true)
/// GET    /{id}  -> get_device
/// PATCH  /{id}  -> update_device
/// DELETE /{id}  -> delete_device
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(devices::list_devices).post(devices::create_device),
        )
        .route(
            "/{id}",
            get(devices::get_device)
                .patch(devices::update_device)
                .delete(devices::delete_device),
        )
}
