//! Wire events exchanged over the realtime channel.
//!
//! All frames are JSON text of the shape `{ "event": ..., "data": ... }`.
//! Event names are protocol constants that connected clients dispatch on;
//! they keep their exact spellings regardless of Rust naming style.

use axum::extract::ws::Message;
use serde::{Deserialize, Serialize};
use waypost_core::types::DbId;
use waypost_db::models::location::LocationResponse;

/// Payload carried by every device-addressed event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DevicePayload {
    #[serde(with = "waypost_core::types::id_string")]
    pub device_id: DbId,
}

/// Client -> server requests.
#[derive(Debug, Deserialize)]
#[serde(tag = "event", content = "data")]
pub enum ClientEvent {
    /// Join a device's command group. Requires the device to exist and
    /// be owned by the connection's user.
    #[serde(rename = "register-device")]
    RegisterDevice(DevicePayload),
    /// Leave a device's command group. No ownership check; any joined
    /// connection may leave.
    #[serde(rename = "unregister-device")]
    UnregisterDevice(DevicePayload),
    /// Ring a device. Requires ownership; broadcasts `ring-command` to
    /// the device's command group.
    #[serde(rename = "ring")]
    Ring(DevicePayload),
}

/// Server -> client pushes.
#[derive(Debug, Serialize)]
#[serde(tag = "event", content = "data")]
pub enum ServerEvent {
    /// A new location was recorded for one of the user's devices.
    #[serde(rename = "locationsUpdate")]
    LocationsUpdate(LocationResponse),
    /// A ring was requested for a device this connection registered for.
    #[serde(rename = "ring-command")]
    RingCommand(DevicePayload),
    /// A client request failed; the connection stays open.
    #[serde(rename = "error")]
    Error { message: String },
}

impl ServerEvent {
    /// Build an error event from any displayable message.
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }

    /// Serialize into a WebSocket text frame.
    pub fn to_message(&self) -> Message {
        match serde_json::to_string(self) {
            Ok(json) => Message::Text(json.into()),
            Err(e) => {
                tracing::error!(error = %e, "Failed to serialize server event");
                Message::Text(r#"{"event":"error","data":{"message":"internal error"}}"#.into())
            }
        }
    }
}
