//! Persistence gateway trait.
//!
//! The orchestrator constructs turns and hands them off; durable storage
//! belongs to whatever sits behind this trait. The use case layer depends
//! only on the trait, not on the infrastructure implementation.

use async_trait::async_trait;

use super::entity::ChatTurn;
use super::error::TurnStoreError;
use super::value_object::RoomId;

/// Gateway to durable storage for chat turns.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TurnStore: Send + Sync {
    /// Append one turn to its room's transcript.
    async fn append(&self, turn: ChatTurn) -> Result<(), TurnStoreError>;

    /// Full transcript of a room, in append order.
    async fn transcript(&self, room_id: &RoomId) -> Result<Vec<ChatTurn>, TurnStoreError>;

    /// Number of rooms with at least one persisted turn.
    async fn conversation_count(&self) -> usize;
}
