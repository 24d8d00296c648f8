use std::sync::Arc;

use crate::config::ServerConfig;
use crate::ws::WsManager;

/// Shared application state available to all Axum handlers via
/// `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already
/// `Clone`). The WebSocket hub is constructed once at startup and shared
/// by handle -- there is no lazily-initialized global.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: waypost_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Realtime fan-out hub.
    pub ws_manager: Arc<WsManager>,
}
