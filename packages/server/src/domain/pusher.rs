//! Event pusher trait.
//!
//! Delivery of serialized events to live connections. The WebSocket-backed
//! implementation lives in the infrastructure layer; the use case layer
//! only ever talks to this trait.

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::error::PushError;
use super::value_object::ConnectionId;

/// Channel used to hand outbound payloads to a connection's writer task.
pub type PusherChannel = mpsc::UnboundedSender<String>;

#[async_trait]
pub trait EventPusher: Send + Sync {
    /// Register a connection's outbound channel.
    async fn register_connection(&self, conn_id: ConnectionId, sender: PusherChannel);

    /// Remove a connection's outbound channel.
    async fn unregister_connection(&self, conn_id: &ConnectionId);

    /// Push a payload to a single connection.
    async fn push_to(&self, conn_id: &ConnectionId, content: &str) -> Result<(), PushError>;

    /// Push a payload to every target connection. Delivery is best-effort:
    /// a failed or missing target is skipped, the rest still receive it.
    async fn broadcast(&self, targets: Vec<ConnectionId>, content: &str)
    -> Result<(), PushError>;
}
