//! Route definitions for the `/tokens` resource.

use axum::routing::{delete, get};
use axum::Router;

use crate::handlers::tokens;
use crate::state::AppState;

/// Routes mounted at `/tokens`.
///
/// ```text
/// GET    /      -> list_tokens
/// DELETE /      -> delete_token_by_value (logout)
/// DELETE /{id}  -> delete_token
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(tokens::list_tokens).delete(tokens::delete_token_by_value),
        )
        .route("/{id}", delete(tokens::delete_token))
}
