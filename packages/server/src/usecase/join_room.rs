//! UseCase: a user joins a room.

use std::sync::Arc;

use crate::domain::{ConnectionId, PresenceRegistry, RoomId, UserId};
use crate::infrastructure::dto::websocket::ServerEvent;

use super::broadcast::RoomBroadcaster;

pub struct JoinRoomUseCase {
    presence: Arc<PresenceRegistry>,
    broadcaster: RoomBroadcaster,
}

impl JoinRoomUseCase {
    pub fn new(presence: Arc<PresenceRegistry>, broadcaster: RoomBroadcaster) -> Self {
        Self {
            presence,
            broadcaster,
        }
    }

    /// Register the (room, user, connection) triple and announce the join
    /// to the room.
    ///
    /// # Returns
    ///
    /// The room's user id list after the join, sorted for consistent
    /// ordering.
    pub async fn execute(
        &self,
        room_id: RoomId,
        user_id: UserId,
        conn_id: ConnectionId,
    ) -> Vec<String> {
        self.presence
            .join(room_id.clone(), user_id.clone(), conn_id);

        let mut participants: Vec<String> = self
            .presence
            .participants(&room_id)
            .into_keys()
            .map(|user| user.into_string())
            .collect();
        participants.sort();

        let event = ServerEvent::UserJoined {
            user_id: user_id.as_str().to_string(),
            participants: participants.clone(),
        };
        self.broadcaster.broadcast(&room_id, &event).await;
        tracing::info!("User '{}' joined room '{}'", user_id, room_id);

        participants
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::EventPusher;
    use crate::infrastructure::WebSocketEventPusher;
    use parlor_shared::time::FixedClock;
    use tokio::sync::mpsc;

    fn room(id: &str) -> RoomId {
        RoomId::new(id.to_string()).unwrap()
    }

    fn user(id: &str) -> UserId {
        UserId::new(id.to_string()).unwrap()
    }

    fn conn(id: &str) -> ConnectionId {
        ConnectionId::new(id.to_string()).unwrap()
    }

    fn create_usecase() -> (JoinRoomUseCase, Arc<WebSocketEventPusher>) {
        let presence = Arc::new(PresenceRegistry::new(Arc::new(FixedClock::new(1000))));
        let pusher = Arc::new(WebSocketEventPusher::new());
        let broadcaster = RoomBroadcaster::new(presence.clone(), pusher.clone());
        (JoinRoomUseCase::new(presence, broadcaster), pusher)
    }

    #[tokio::test]
    async fn test_join_returns_sorted_participant_list() {
        // given:
        let (usecase, _pusher) = create_usecase();
        usecase
            .execute(room("42"), user("charlie"), conn("c1"))
            .await;
        usecase.execute(room("42"), user("alice"), conn("c2")).await;

        // when:
        let participants = usecase.execute(room("42"), user("bob"), conn("c3")).await;

        // then:
        assert_eq!(participants, vec!["alice", "bob", "charlie"]);
    }

    #[tokio::test]
    async fn test_join_is_announced_to_everyone_in_the_room() {
        // given: alice already in the room with a live connection
        let (usecase, pusher) = create_usecase();
        let (tx1, mut rx1) = mpsc::unbounded_channel();
        pusher.register_connection(conn("c1"), tx1).await;
        usecase.execute(room("42"), user("alice"), conn("c1")).await;
        rx1.recv().await.unwrap(); // alice's own join announcement

        // when: bob joins
        let (tx2, mut rx2) = mpsc::unbounded_channel();
        pusher.register_connection(conn("c2"), tx2).await;
        usecase.execute(room("42"), user("bob"), conn("c2")).await;

        // then: both connections receive the user_joined event
        let to_alice = rx1.recv().await.unwrap();
        let to_bob = rx2.recv().await.unwrap();
        assert!(to_alice.contains("user_joined"));
        assert!(to_alice.contains("bob"));
        assert_eq!(to_alice, to_bob);
    }
}
