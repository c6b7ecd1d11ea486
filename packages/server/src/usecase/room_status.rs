//! UseCase: aggregate presence and conversation counts.

use std::sync::Arc;

use crate::domain::{PresenceRegistry, TurnStore};

/// Read-only aggregate of live server state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusSnapshot {
    /// Distinct users holding at least one connection.
    pub active_users: usize,
    /// Rooms with at least one member.
    pub active_rooms: usize,
    /// Rooms with at least one persisted turn.
    pub conversations: usize,
}

pub struct RoomStatusUseCase {
    presence: Arc<PresenceRegistry>,
    turn_store: Arc<dyn TurnStore>,
}

impl RoomStatusUseCase {
    pub fn new(presence: Arc<PresenceRegistry>, turn_store: Arc<dyn TurnStore>) -> Self {
        Self {
            presence,
            turn_store,
        }
    }

    /// Snapshot the counts. No side effects.
    pub async fn execute(&self) -> StatusSnapshot {
        StatusSnapshot {
            active_users: self.presence.user_count(),
            active_rooms: self.presence.room_count(),
            conversations: self.turn_store.conversation_count().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ChatTurn, ConnectionId, RoomId, Timestamp, UserId};
    use crate::infrastructure::InMemoryTurnStore;
    use parlor_shared::time::FixedClock;

    fn room(id: &str) -> RoomId {
        RoomId::new(id.to_string()).unwrap()
    }

    fn user(id: &str) -> UserId {
        UserId::new(id.to_string()).unwrap()
    }

    fn conn(id: &str) -> ConnectionId {
        ConnectionId::new(id.to_string()).unwrap()
    }

    #[tokio::test]
    async fn test_status_counts_users_rooms_and_conversations() {
        // given: alice in two rooms, bob in one, one room with history
        let presence = Arc::new(PresenceRegistry::new(Arc::new(FixedClock::new(1000))));
        presence.join(room("42"), user("alice"), conn("c1"));
        presence.join(room("43"), user("alice"), conn("c2"));
        presence.join(room("42"), user("bob"), conn("c3"));
        let store = Arc::new(InMemoryTurnStore::new());
        store
            .append(ChatTurn::user(
                room("42"),
                user("alice"),
                "Hello".to_string(),
                Timestamp::new(1000),
            ))
            .await
            .unwrap();
        let usecase = RoomStatusUseCase::new(presence, store);

        // when:
        let status = usecase.execute().await;

        // then:
        assert_eq!(
            status,
            StatusSnapshot {
                active_users: 2,
                active_rooms: 2,
                conversations: 1,
            }
        );
    }

    #[tokio::test]
    async fn test_status_of_idle_server_is_all_zeroes() {
        // given:
        let presence = Arc::new(PresenceRegistry::new(Arc::new(FixedClock::new(1000))));
        let store = Arc::new(InMemoryTurnStore::new());
        let usecase = RoomStatusUseCase::new(presence, store);

        // when / then:
        assert_eq!(
            usecase.execute().await,
            StatusSnapshot {
                active_users: 0,
                active_rooms: 0,
                conversations: 0,
            }
        );
    }
}
