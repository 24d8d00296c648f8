use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::response::Response;
use futures::{SinkExt, StreamExt};
use serde::Deserialize;
use waypost_core::error::CoreError;
use waypost_core::types::DbId;
use waypost_db::repositories::DeviceRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::resolve_bearer_user;
use crate::state::AppState;
use crate::ws::events::{ClientEvent, DevicePayload, ServerEvent};
use crate::ws::manager::WsManager;

/// Query parameters accepted by the WebSocket endpoint.
///
/// Browser WebSocket clients cannot set request headers, so the access
/// token may arrive as `?token=` instead of `Authorization: Bearer`.
#[derive(Debug, Deserialize)]
pub struct WsQuery {
    pub token: Option<String>,
}

/// HTTP handler that authenticates and upgrades the connection.
///
/// The bearer token (header or query parameter) must resolve to a live
/// user before the upgrade completes; unauthenticated attempts are
/// rejected with 401 at handshake, not after.
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    Query(query): Query<WsQuery>,
    headers: HeaderMap,
    State(state): State<AppState>,
) -> AppResult<Response> {
    let bearer = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::to_owned);

    let token = bearer.or(query.token).ok_or_else(|| {
        AppError::Core(CoreError::Unauthorized("Missing access token".into()))
    })?;

    let user = resolve_bearer_user(&state, &token).await?;

    Ok(ws.on_upgrade(move |socket| handle_socket(socket, state, user.id)))
}

/// Manage a single WebSocket connection after upgrade.
///
/// Splits the socket into a sink (outbound) and stream (inbound), then:
///   1. Registers the connection with `WsManager` under its user.
///   2. Spawns a sender task that forwards messages from the manager
///      channel.
///   3. Processes inbound events on the current task.
///   4. Cleans up on disconnect.
async fn handle_socket(socket: WebSocket, state: AppState, user_id: DbId) {
    let conn_id = uuid::Uuid::new_v4().to_string();
    tracing::info!(conn_id = %conn_id, user_id, "WebSocket connected");

    // Register and get the receiver for outbound messages.
    let mut rx = state.ws_manager.add(conn_id.clone(), user_id).await;

    let (mut sink, mut stream) = socket.split();

    // Sender task: forward channel messages to the WebSocket sink.
    let sender_conn_id = conn_id.clone();
    let send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sink.send(msg).await.is_err() {
                tracing::debug!(conn_id = %sender_conn_id, "WebSocket sink closed");
                break;
            }
        }
    });

    // Receiver loop: process inbound events.
    while let Some(result) = stream.next().await {
        match result {
            Ok(Message::Close(_)) => break,
            Ok(Message::Pong(_)) => {
                tracing::trace!(conn_id = %conn_id, "Pong received");
            }
            Ok(Message::Text(text)) => match serde_json::from_str::<ClientEvent>(&text) {
                Ok(event) => handle_event(&state, &conn_id, user_id, event).await,
                Err(e) => {
                    tracing::debug!(conn_id = %conn_id, error = %e, "Unparseable client event");
                    state
                        .ws_manager
                        .send_to_conn(&conn_id, ServerEvent::error("Unknown event").to_message())
                        .await;
                }
            },
            Ok(_) => {}
            Err(e) => {
                tracing::debug!(conn_id = %conn_id, error = %e, "WebSocket receive error");
                break;
            }
        }
    }

    // Clean up: remove connection (and its group memberships) and abort
    // the sender task.
    state.ws_manager.remove(&conn_id).await;
    send_task.abort();
    tracing::info!(conn_id = %conn_id, "WebSocket disconnected");
}

/// Dispatch a single client event.
///
/// Failures are reported back as `error` events on the same connection;
/// the channel is never torn down for a bad request.
async fn handle_event(state: &AppState, conn_id: &str, user_id: DbId, event: ClientEvent) {
    let manager = &state.ws_manager;
    match event {
        ClientEvent::RegisterDevice(DevicePayload { device_id }) => {
            if check_device_ownership(state, manager, conn_id, user_id, device_id).await {
                manager.join_device(conn_id, device_id).await;
                tracing::debug!(conn_id = %conn_id, device_id, "Joined device group");
            }
        }
        ClientEvent::UnregisterDevice(DevicePayload { device_id }) => {
            manager.leave_device(conn_id, device_id).await;
            tracing::debug!(conn_id = %conn_id, device_id, "Left device group");
        }
        ClientEvent::Ring(DevicePayload { device_id }) => {
            if check_device_ownership(state, manager, conn_id, user_id, device_id).await {
                let sent = manager
                    .send_to_device(
                        device_id,
                        ServerEvent::RingCommand(DevicePayload { device_id }).to_message(),
                    )
                    .await;
                tracing::info!(user_id, device_id, sent, "Ring command dispatched");
            }
        }
    }
}

/// Verify the device exists and belongs to `user_id`, reporting failures
/// to the connection as error events. Returns whether the check passed.
async fn check_device_ownership(
    state: &AppState,
    manager: &Arc<WsManager>,
    conn_id: &str,
    user_id: DbId,
    device_id: DbId,
) -> bool {
    match DeviceRepo::find_by_id(&state.pool, device_id).await {
        Ok(Some(device)) if device.user_id == user_id => true,
        Ok(Some(_)) => {
            manager
                .send_to_conn(
                    conn_id,
                    ServerEvent::error("Device belongs to another user").to_message(),
                )
                .await;
            false
        }
        Ok(None) => {
            manager
                .send_to_conn(conn_id, ServerEvent::error("Device not found").to_message())
                .await;
            false
        }
        Err(e) => {
            tracing::error!(error = %e, device_id, "Device lookup failed");
            manager
                .send_to_conn(conn_id, ServerEvent::error("Internal error").to_message())
                .await;
            false
        }
    }
}
