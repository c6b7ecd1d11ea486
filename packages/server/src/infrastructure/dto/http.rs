//! HTTP API response DTOs.

use serde::{Deserialize, Serialize};

/// Aggregate presence and conversation counts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusDto {
    pub active_users: usize,
    pub active_rooms: usize,
    pub conversations: usize,
}

/// One persisted turn in a room transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnDto {
    pub user_id: String,
    pub role: String,
    pub content: String,
    pub sent_at: String,
}

/// Full transcript of one room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptDto {
    pub room_id: String,
    pub turns: Vec<TurnDto>,
}
