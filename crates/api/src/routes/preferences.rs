//! Route definitions for the `/preferences` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::preferences;
use crate::state::AppState;

/// Routes mounted at `/preferences`.
///
/// ```text
/// POST   /      -> create_preference
/// GET    /      -> list_preferences (?key=)
/// GET    /{id}  -> get_preference
/// PATCH  /{id}  -> update_preference
/// DELETE /{id}  -> delete_preference
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(preferences::list_preferences).post(preferences::create_preference),
        )
        .route(
            "/{id}",
            get(preferences::get_preference)
                .patch(preferences::update_preference)
                .delete(preferences::delete_preference),
        )
}
