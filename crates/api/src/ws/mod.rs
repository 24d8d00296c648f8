//! WebSocket infrastructure for real-time communication.
//!
//! Provides the authenticated upgrade handler, the fan-out hub with
//! per-user and per-device groups, the wire events, and heartbeat
//! monitoring.

pub mod events;
mod handler;
mod heartbeat;
pub mod manager;

pub use handler::ws_handler;
pub use heartbeat::start_heartbeat;
pub use manager::WsManager;
