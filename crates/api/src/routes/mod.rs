//! Route definitions, one module per resource.

pub mod auth;
pub mod devices;
pub mod health;
pub mod locations;
pub mod preferences;
pub mod settings;
pub mod status;
pub mod tokens;
pub mod user;

use axum::routing::get;
use axum::Router;

use crate::state::AppState;
use crate::ws;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /ws                         WebSocket (token-authenticated handshake)
/// /status                     public setup/registration probe
///
/// /auth/register              register (public)
/// /auth/login                 login (public)
/// /auth/refresh               refresh (public, requires refresh token)
///
/// /devices                    create, list (auth)
/// /devices/{id}               get, update, delete (owner)
///
/// /locations                  create, history (auth)
/// /locations/dates            available dates per device (owner)
/// /locations/{id}             get, update, delete (owner, via device)
///
/// /preferences                create, list (auth)
/// /preferences/{id}           get, update, delete (owner)
///
/// /settings                   create (admin), list (auth)
/// /settings/{id}              get (auth), update, delete (admin)
///
/// /user                       get, update (auth)
///
/// /tokens                     list sessions, revoke by value (auth)
/// /tokens/{id}                revoke by id (owner)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/ws", get(ws::ws_handler))
        .merge(status::router())
        .nest("/auth", auth::router())
        .nest("/devices", devices::router())
        .nest("/locations", locations::router())
        .nest("/preferences", preferences::router())
        .nest("/settings", settings::router())
        .nest("/user", user::router())
        .nest("/tokens", tokens::router())
}
