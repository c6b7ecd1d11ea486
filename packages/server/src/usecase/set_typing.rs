//! UseCase: a user starts or stops typing in a room.

use std::sync::Arc;

use crate::domain::{ConnectionId, PresenceRegistry, RoomId, UserId};
use crate::infrastructure::dto::websocket::ServerEvent;

use super::broadcast::RoomBroadcaster;

pub struct SetTypingUseCase {
    presence: Arc<PresenceRegistry>,
    broadcaster: RoomBroadcaster,
}

impl SetTypingUseCase {
    pub fn new(presence: Arc<PresenceRegistry>, broadcaster: RoomBroadcaster) -> Self {
        Self {
            presence,
            broadcaster,
        }
    }

    /// Update the typing flag and announce it to the room. The flag update
    /// is idempotent; the announcement mirrors each received event, so a
    /// client sending the same state twice produces two identical
    /// broadcasts and no state change.
    pub async fn execute(
        &self,
        room_id: RoomId,
        user_id: UserId,
        conn_id: ConnectionId,
        typing: bool,
    ) {
        self.presence.set_typing(&room_id, &user_id, typing);
        self.presence.touch(&user_id, &conn_id);

        let event = ServerEvent::UserTyping {
            user_id: user_id.as_str().to_string(),
            typing,
        };
        self.broadcaster.broadcast(&room_id, &event).await;
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

    fn create_usecase() -> (SetTypingUseCase, Arc<PresenceRegistry>, Arc<WebSocketEventPusher>) {
        let presence = Arc::new(PresenceRegistry::new(Arc::new(FixedClock::new(1000))));
        let pusher = Arc::new(WebSocketEventPusher::new());
        let broadcaster = RoomBroadcaster::new(presence.clone(), pusher.clone());
        (
            SetTypingUseCase::new(presence.clone(), broadcaster),
            presence,
            pusher,
        )
    }

    #[tokio::test]
    async fn test_typing_flag_is_set_and_announced() {
        // given:
        let (usecase, presence, pusher) = create_usecase();
        presence.join(room("42"), user("alice"), conn("c1"));
        presence.join(room("42"), user("bob"), conn("c2"));
        let (tx2, mut rx2) = mpsc::unbounded_channel();
        pusher.register_connection(conn("c2"), tx2).await;

        // when:
        usecase
            .execute(room("42"), user("alice"), conn("c1"), true)
            .await;

        // then:
        assert!(presence.is_typing(&user("alice"), &room("42")));
        let event = rx2.recv().await.unwrap();
        assert!(event.contains("user_typing"));
        assert!(event.contains("alice"));
    }

    #[tokio::test]
    async fn test_repeated_typing_events_stay_idempotent_in_state() {
        // given:
        let (usecase, presence, pusher) = create_usecase();
        presence.join(room("42"), user("alice"), conn("c1"));
        let (tx1, mut rx1) = mpsc::unbounded_channel();
        pusher.register_connection(conn("c1"), tx1).await;

        // when: the client reports typing twice
        usecase
            .execute(room("42"), user("alice"), conn("c1"), true)
            .await;
        usecase
            .execute(room("42"), user("alice"), conn("c1"), true)
            .await;

        // then: flag is still set, one broadcast per invocation and no more
        assert!(presence.is_typing(&user("alice"), &room("42")));
        assert!(rx1.recv().await.is_some());
        assert!(rx1.recv().await.is_some());
        assert_eq!(rx1.try_recv().ok(), None);
    }
}
