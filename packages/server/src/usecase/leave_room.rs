//! UseCase: a user leaves a room.

use std::sync::Arc;

use crate::domain::{ConnectionId, PresenceRegistry, RoomId, UserId};
use crate::infrastructure::dto::websocket::ServerEvent;

use super::broadcast::RoomBroadcaster;

pub struct LeaveRoomUseCase {
    presence: Arc<PresenceRegistry>,
    broadcaster: RoomBroadcaster,
}

impl LeaveRoomUseCase {
    pub fn new(presence: Arc<PresenceRegistry>, broadcaster: RoomBroadcaster) -> Self {
        Self {
            presence,
            broadcaster,
        }
    }

    /// Remove the (room, user, connection) triple and announce the leave.
    ///
    /// A leave whose connection id does not match the stored one is a
    /// stale leave from a superseded connection: membership is untouched
    /// and nothing is announced.
    ///
    /// # Returns
    ///
    /// Whether the user was actually removed from the room.
    pub async fn execute(
        &self,
        room_id: RoomId,
        user_id: UserId,
        conn_id: ConnectionId,
    ) -> bool {
        let removed = self.presence.leave(&room_id, &user_id, &conn_id);

        if removed {
            let event = ServerEvent::UserLeft {
                user_id: user_id.as_str().to_string(),
            };
            self.broadcaster.broadcast(&room_id, &event).await;
            tracing::info!("User '{}' left room '{}'", user_id, room_id);
        } else {
            tracing::debug!(
                "Ignoring leave for '{}' in room '{}': connection does not match",
                user_id,
                room_id
            );
        }

        removed
    }
}
