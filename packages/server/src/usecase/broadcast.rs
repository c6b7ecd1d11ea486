//! Room-scoped event fan-out.

use std::sync::Arc;

use crate::domain::{ConnectionId, EventPusher, PresenceRegistry, RoomId};
use crate::infrastructure::dto::websocket::ServerEvent;

/// Delivers an event to every connection currently in a room.
///
/// The participant set is snapshotted at call time; a connection that
/// leaves mid-fanout may or may not receive the event. Delivery is
/// best-effort with no acknowledgment, and one failing connection never
/// prevents delivery to the rest (the pusher's broadcast contract).
#[derive(Clone)]
pub struct RoomBroadcaster {
    presence: Arc<PresenceRegistry>,
    pusher: Arc<dyn EventPusher>,
}

impl RoomBroadcaster {
    pub fn new(presence: Arc<PresenceRegistry>, pusher: Arc<dyn EventPusher>) -> Self {
        Self { presence, pusher }
    }

    /// Fan an event out to the room's current participants.
    pub async fn broadcast(&self, room_id: &RoomId, event: &ServerEvent) {
        let payload = match serde_json::to_string(event) {
            Ok(payload) => payload,
            Err(e) => {
                tracing::error!("Failed to serialize event for room '{}': {}", room_id, e);
                return;
            }
        };

        let targets: Vec<ConnectionId> =
            self.presence.participants(room_id).into_values().collect();
        if targets.is_empty() {
            tracing::debug!("No participants in room '{}', dropping event", room_id);
            return;
        }

        if let Err(e) = self.pusher.broadcast(targets, &payload).await {
            tracing::warn!("Failed to broadcast to room '{}': {}", room_id, e);
        }
    }

    /// Deliver an event to a single connection (e.g. an error reply to a
    /// malformed payload).
    pub async fn push_to(&self, conn_id: &ConnectionId, event: &ServerEvent) {
        let payload = match serde_json::to_string(event) {
            Ok(payload) => payload,
            Err(e) => {
                tracing::error!("Failed to serialize event for '{}': {}", conn_id, e);
                return;
            }
        };
        if let Err(e) = self.pusher.push_to(conn_id, &payload).await {
            tracing::warn!("Failed to push event to connection '{}': {}", conn_id, e);
        }
    }
}
