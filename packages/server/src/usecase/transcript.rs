//! UseCase: read a room's persisted transcript.

use std::sync::Arc;

use crate::domain::{ChatTurn, RoomId, TurnStore, TurnStoreError};

use super::error::GetTranscriptError;

pub struct GetTranscriptUseCase {
    turn_store: Arc<dyn TurnStore>,
}

impl GetTranscriptUseCase {
    pub fn new(turn_store: Arc<dyn TurnStore>) -> Self {
        Self { turn_store }
    }

    /// Fetch the full transcript of a room, in append order.
    pub async fn execute(&self, room_id: RoomId) -> Result<Vec<ChatTurn>, GetTranscriptError> {
        self.turn_store
            .transcript(&room_id)
            .await
            .map_err(|e| match e {
                TurnStoreError::UnknownRoom(_) => GetTranscriptError::RoomNotFound,
                other => GetTranscriptError::StorageError(other.to_string()),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Timestamp, UserId};
    use crate::infrastructure::InMemoryTurnStore;

    fn room(id: &str) -> RoomId {
        RoomId::new(id.to_string()).unwrap()
    }

    #[tokio::test]
    async fn test_transcript_is_returned_in_append_order() {
        // given:
        let store = Arc::new(InMemoryTurnStore::new());
        let alice = UserId::new("alice".to_string()).unwrap();
        store
            .append(ChatTurn::user(
                room("42"),
                alice.clone(),
                "Hello".to_string(),
                Timestamp::new(1000),
            ))
            .await
            .unwrap();
        store
            .append(ChatTurn::bot(
                room("42"),
                alice,
                "Hi there".to_string(),
                Timestamp::new(2000),
            ))
            .await
            .unwrap();
        let usecase = GetTranscriptUseCase::new(store);

        // when:
        let transcript = usecase.execute(room("42")).await.unwrap();

        // then:
        assert_eq!(transcript.len(), 2);
        assert_eq!(transcript[0].content, "Hello");
        assert_eq!(transcript[1].content, "Hi there");
    }

    #[tokio::test]
    async fn test_unknown_room_maps_to_not_found() {
        // given:
        let store = Arc::new(InMemoryTurnStore::new());
        let usecase = GetTranscriptUseCase::new(store);

        // when:
        let result = usecase.execute(room("nowhere")).await;

        // then:
        assert_eq!(result.unwrap_err(), GetTranscriptError::RoomNotFound);
    }
}
