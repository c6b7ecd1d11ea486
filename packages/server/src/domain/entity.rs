//! Domain entities.

use super::value_object::{AuthorRole, RoomId, Timestamp, UserId};

/// One persisted message in a conversation, authored by either a user or
/// the bot. Immutable once constructed; durable storage is owned by the
/// [`TurnStore`](super::turn_store::TurnStore) gateway, this type is only
/// built here and handed off.
///
/// Bot turns carry the id of the user they reply to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatTurn {
    pub room_id: RoomId,
    pub user_id: UserId,
    pub role: AuthorRole,
    pub content: String,
    pub sent_at: Timestamp,
}

impl ChatTurn {
    /// Build a user-authored turn from already-normalized content.
    pub fn user(room_id: RoomId, user_id: UserId, content: String, sent_at: Timestamp) -> Self {
        Self {
            room_id,
            user_id,
            role: AuthorRole::User,
            content,
            sent_at,
        }
    }

    /// Build a bot-authored turn replying to `user_id`.
    pub fn bot(room_id: RoomId, user_id: UserId, content: String, sent_at: Timestamp) -> Self {
        Self {
            room_id,
            user_id,
            role: AuthorRole::Bot,
            content,
            sent_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_turn_carries_user_role() {
        // given:
        let room = RoomId::new("42".to_string()).unwrap();
        let user = UserId::new("alice".to_string()).unwrap();

        // when:
        let turn = ChatTurn::user(room, user, "Hello".to_string(), Timestamp::new(1000));

        // then:
        assert_eq!(turn.role, AuthorRole::User);
        assert_eq!(turn.content, "Hello");
        assert_eq!(turn.sent_at, Timestamp::new(1000));
    }

    #[test]
    fn test_bot_turn_carries_bot_role() {
        // given:
        let room = RoomId::new("42".to_string()).unwrap();
        let user = UserId::new("alice".to_string()).unwrap();

        // when:
        let turn = ChatTurn::bot(room, user.clone(), "Hi there".to_string(), Timestamp::new(2000));

        // then:
        assert_eq!(turn.role, AuthorRole::Bot);
        // the bot turn keeps a reference to the user it replied to
        assert_eq!(turn.user_id, user);
    }
}
