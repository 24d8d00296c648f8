//! Route definitions for the `/locations` resource.
//!
//! All endpoints require authentication; ownership is resolved through
//! the owning device in the handlers.

use axum::routing::get;
use axum::Router;

use crate::handlers::locations;
use crate::state::AppState;

/// Routes mounted at `/locations`.
///
/// ```text
/// POST   /       -> create_location (fans out locationsUpdate)
/// GET    /       -> list_locations (?device_id=&start_date=&end_date=&latest=)
/// GET    /dates  -> available_dates (?device_id=)
/// GET    /{id}   -> get_location
/// PATCH  /{id}   -> update_location
/// DELETE /{id}   -> delete_location
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(locations::list_locations).post(locations::create_location),
        )
        .route("/dates", get(locations::available_dates))
        .route(
            "/{id}",
            get(locations::get_location)
                .patch(locations::update_location)
                .delete(locations::delete_location),
        )
}
