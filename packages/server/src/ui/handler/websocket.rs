//! WebSocket connection handlers.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use tokio::sync::mpsc;

use crate::{
    domain::{ConnectionId, RoomId, UserId},
    infrastructure::dto::websocket::{ClientEvent, ServerEvent},
    usecase::InboundMessage,
};

use super::super::state::AppState;

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Spawns a task that receives payloads from the rx channel and pushes
/// them to the WebSocket sender.
///
/// This is the outbound half of a connection: events addressed to this
/// connection (via the EventPusher registry) arrive on the channel and go
/// out over the socket.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: futures_util::stream::SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            // Send the payload to this client
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    // Each socket gets a server-generated connection id; a reconnecting
    // user gets a fresh one, superseding any older room mapping on join.
    let conn_id = ConnectionId::generate();
    let (tx, rx) = mpsc::unbounded_channel();
    state
        .event_pusher
        .register_connection(conn_id.clone(), tx)
        .await;
    tracing::info!("Connection '{}' established", conn_id);

    let (sender, mut receiver) = socket.split();

    // Spawn a task to push events from other handlers to this client
    let mut send_task = pusher_loop(rx, sender);

    // Spawn a task to receive events from this client
    let recv_state = state.clone();
    let recv_conn = conn_id.clone();
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::error!("WebSocket error: {}", e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    handle_client_event(&recv_state, &recv_conn, &text).await;
                }
                Message::Ping(_) => {
                    tracing::debug!("Received ping");
                    // Ping/pong is handled automatically by the WebSocket protocol
                }
                Message::Close(_) => {
                    tracing::info!("Connection '{}' requested close", recv_conn);
                    break;
                }
                _ => {}
            }
        }
    });

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    // Socket teardown only deregisters the outbound channel. Room
    // membership is event-driven: a disconnect without an explicit leave
    // keeps the mapping until a fresh join supersedes it.
    state.event_pusher.unregister_connection(&conn_id).await;
    tracing::info!("Connection '{}' closed and deregistered", conn_id);
}

async fn handle_client_event(state: &Arc<AppState>, conn_id: &ConnectionId, text: &str) {
    tracing::debug!("Received event on '{}': {}", conn_id, text);

    let event = match serde_json::from_str::<ClientEvent>(text) {
        Ok(event) => event,
        Err(e) => {
            tracing::warn!("Failed to parse event on '{}': {}", conn_id, e);
            send_error(state, conn_id, "Unrecognized event payload").await;
            return;
        }
    };

    match event {
        ClientEvent::Join { user_id, room_id } => {
            let Some((user_id, room_id)) = identifiers(state, conn_id, user_id, room_id).await
            else {
                return;
            };
            state
                .join_room_usecase
                .execute(room_id, user_id, conn_id.clone())
                .await;
        }
        ClientEvent::Leave { user_id, room_id } => {
            let Some((user_id, room_id)) = identifiers(state, conn_id, user_id, room_id).await
            else {
                return;
            };
            state
                .leave_room_usecase
                .execute(room_id, user_id, conn_id.clone())
                .await;
        }
        ClientEvent::Typing {
            user_id,
            room_id,
            typing,
        } => {
            let Some((user_id, room_id)) = identifiers(state, conn_id, user_id, room_id).await
            else {
                return;
            };
            state
                .set_typing_usecase
                .execute(room_id, user_id, conn_id.clone(), typing)
                .await;
        }
        ClientEvent::Message {
            user_id,
            room_id,
            content,
            display_name,
        } => {
            let Some((user_id, room_id)) = identifiers(state, conn_id, user_id, room_id).await
            else {
                return;
            };
            state.presence.touch(&user_id, conn_id);

            let message = InboundMessage {
                room_id,
                user_id,
                content,
                display_name,
            };
            // terminal failures were already announced to the room by the
            // pipeline; nothing else to do here
            if let Err(failure) = state.process_message_usecase.execute(message).await {
                tracing::debug!(
                    "Message on '{}' terminated with {}: {}",
                    conn_id,
                    failure.code.as_str(),
                    failure.message
                );
            }
        }
    }
}

/// Convert raw identifier strings into domain values, answering the
/// offending connection with an `error` event when they are malformed.
async fn identifiers(
    state: &Arc<AppState>,
    conn_id: &ConnectionId,
    user_id: String,
    room_id: String,
) -> Option<(UserId, RoomId)> {
    match (UserId::try_from(user_id), RoomId::try_from(room_id)) {
        (Ok(user_id), Ok(room_id)) => Some((user_id, room_id)),
        _ => {
            tracing::warn!("Invalid identifiers in event on '{}'", conn_id);
            send_error(state, conn_id, "Invalid user or room identifier").await;
            None
        }
    }
}

/// Error reply to a single connection; no state mutation, no code.
async fn send_error(state: &Arc<AppState>, conn_id: &ConnectionId, message: &str) {
    let event = ServerEvent::error(message.to_string(), None);
    let payload = match serde_json::to_string(&event) {
        Ok(payload) => payload,
        Err(e) => {
            tracing::error!("Failed to serialize error event: {}", e);
            return;
        }
    };
    if let Err(e) = state.event_pusher.push_to(conn_id, &payload).await {
        tracing::warn!("Failed to send error to '{}': {}", conn_id, e);
    }
}
