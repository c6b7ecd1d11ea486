//! In-memory TurnStore implementation.
//!
//! Keeps each room's transcript in a HashMap. Enough for development and
//! tests; a database-backed implementation would slot in behind the same
//! trait without touching the use case layer.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{ChatTurn, RoomId, TurnStore, TurnStoreError};

pub struct InMemoryTurnStore {
    conversations: Mutex<HashMap<RoomId, Vec<ChatTurn>>>,
}

impl InMemoryTurnStore {
    pub fn new() -> Self {
        Self {
            conversations: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryTurnStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TurnStore for InMemoryTurnStore {
    async fn append(&self, turn: ChatTurn) -> Result<(), TurnStoreError> {
        let mut conversations = self.conversations.lock().await;
        conversations
            .entry(turn.room_id.clone())
            .or_default()
            .push(turn);
        Ok(())
    }

    async fn transcript(&self, room_id: &RoomId) -> Result<Vec<ChatTurn>, TurnStoreError> {
        let conversations = self.conversations.lock().await;
        conversations
            .get(room_id)
            .cloned()
            .ok_or_else(|| TurnStoreError::UnknownRoom(room_id.as_str().to_string()))
    }

    async fn conversation_count(&self) -> usize {
        let conversations = self.conversations.lock().await;
        conversations.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Timestamp, UserId};

    fn room(id: &str) -> RoomId {
        RoomId::new(id.to_string()).unwrap()
    }

    fn user_turn(room_id: &str, content: &str) -> ChatTurn {
        ChatTurn::user(
            room(room_id),
            UserId::new("alice".to_string()).unwrap(),
            content.to_string(),
            Timestamp::new(1000),
        )
    }

    #[tokio::test]
    async fn test_append_then_transcript_preserves_order() {
        // given:
        let store = InMemoryTurnStore::new();

        // when:
        store.append(user_turn("42", "first")).await.unwrap();
        store.append(user_turn("42", "second")).await.unwrap();

        // then:
        let transcript = store.transcript(&room("42")).await.unwrap();
        assert_eq!(transcript.len(), 2);
        assert_eq!(transcript[0].content, "first");
        assert_eq!(transcript[1].content, "second");
    }

    #[tokio::test]
    async fn test_transcript_of_unknown_room_is_an_error() {
        // given:
        let store = InMemoryTurnStore::new();

        // when:
        let result = store.transcript(&room("nowhere")).await;

        // then:
        assert!(matches!(result, Err(TurnStoreError::UnknownRoom(_))));
    }

    #[tokio::test]
    async fn test_conversation_count_counts_rooms_not_turns() {
        // given:
        let store = InMemoryTurnStore::new();
        store.append(user_turn("42", "one")).await.unwrap();
        store.append(user_turn("42", "two")).await.unwrap();
        store.append(user_turn("43", "three")).await.unwrap();

        // when / then:
        assert_eq!(store.conversation_count().await, 2);
    }
}
