//! Conversion logic between DTOs and domain entities.

use parlor_shared::time::timestamp_to_rfc3339;

use crate::domain::ChatTurn;
use crate::infrastructure::dto::http::TurnDto;
use crate::infrastructure::dto::websocket::ServerEvent;

impl From<&ChatTurn> for TurnDto {
    fn from(turn: &ChatTurn) -> Self {
        Self {
            user_id: turn.user_id.as_str().to_string(),
            role: turn.role.as_str().to_string(),
            content: turn.content.clone(),
            sent_at: timestamp_to_rfc3339(turn.sent_at.value()),
        }
    }
}

impl ServerEvent {
    /// `new_message` event for a persisted turn.
    pub fn new_message(turn: &ChatTurn, display_name: Option<String>) -> Self {
        ServerEvent::NewMessage {
            room_id: turn.room_id.as_str().to_string(),
            user_id: turn.user_id.as_str().to_string(),
            role: turn.role.as_str().to_string(),
            content: turn.content.clone(),
            display_name,
            sent_at: timestamp_to_rfc3339(turn.sent_at.value()),
        }
    }
}
