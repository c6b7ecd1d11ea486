//! WebSocket event DTOs.
//!
//! Events are tagged unions over a `type` field, so one `serde_json`
//! parse both dispatches and validates an inbound payload. A payload
//! with a missing required field or an unknown tag fails to parse and is
//! answered with an `error` event instead of mutating any state.

use serde::{Deserialize, Serialize};

/// Client-to-server events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientEvent {
    Join {
        user_id: String,
        room_id: String,
    },
    Leave {
        user_id: String,
        room_id: String,
    },
    Typing {
        user_id: String,
        room_id: String,
        typing: bool,
    },
    Message {
        user_id: String,
        room_id: String,
        content: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        display_name: Option<String>,
    },
}

/// Server-to-client events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerEvent {
    UserJoined {
        user_id: String,
        participants: Vec<String>,
    },
    UserLeft {
        user_id: String,
    },
    UserTyping {
        user_id: String,
        typing: bool,
    },
    NewMessage {
        room_id: String,
        user_id: String,
        role: String,
        content: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        display_name: Option<String>,
        sent_at: String,
    },
    BotTyping {
        status: bool,
    },
    Error {
        message: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        code: Option<String>,
    },
}

impl ServerEvent {
    /// Error event with a machine-readable code.
    pub fn error(message: String, code: Option<String>) -> Self {
        ServerEvent::Error { message, code }
    }
}
