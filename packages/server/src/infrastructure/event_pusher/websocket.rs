//! WebSocket-backed EventPusher implementation.
//!
//! Socket upgrades happen in the UI layer (`ui/handler/websocket.rs`);
//! this implementation only manages each connection's `UnboundedSender`
//! and pushes serialized events through it. The split keeps connection
//! acceptance and event delivery in separate layers.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{ConnectionId, EventPusher, PushError, PusherChannel};

/// EventPusher over per-connection mpsc channels, one writer task per
/// WebSocket draining its channel.
pub struct WebSocketEventPusher {
    connections: Mutex<HashMap<ConnectionId, PusherChannel>>,
}

impl WebSocketEventPusher {
    pub fn new() -> Self {
        Self {
            connections: Mutex::new(HashMap::new()),
        }
    }

    /// Number of registered connections.
    pub async fn connection_count(&self) -> usize {
        self.connections.lock().await.len()
    }
}

impl Default for WebSocketEventPusher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EventPusher for WebSocketEventPusher {
    async fn register_connection(&self, conn_id: ConnectionId, sender: PusherChannel) {
        let mut connections = self.connections.lock().await;
        connections.insert(conn_id.clone(), sender);
        tracing::debug!("Connection '{}' registered to EventPusher", conn_id);
    }

    async fn unregister_connection(&self, conn_id: &ConnectionId) {
        let mut connections = self.connections.lock().await;
        connections.remove(conn_id);
        tracing::debug!("Connection '{}' unregistered from EventPusher", conn_id);
    }

    async fn push_to(&self, conn_id: &ConnectionId, content: &str) -> Result<(), PushError> {
        let connections = self.connections.lock().await;

        if let Some(sender) = connections.get(conn_id) {
            sender
                .send(content.to_string())
                .map_err(|e| PushError::PushFailed(e.to_string()))?;
            tracing::debug!("Pushed event to connection '{}'", conn_id);
            Ok(())
        } else {
            Err(PushError::ConnectionNotFound(conn_id.as_str().to_string()))
        }
    }

    async fn broadcast(
        &self,
        targets: Vec<ConnectionId>,
        content: &str,
    ) -> Result<(), PushError> {
        let connections = self.connections.lock().await;

        for target in targets {
            if let Some(sender) = connections.get(&target) {
                // one dead connection must not starve the rest of the room
                if let Err(e) = sender.send(content.to_string()) {
                    tracing::warn!("Failed to push event to connection '{}': {}", target, e);
                } else {
                    tracing::debug!("Broadcasted event to connection '{}'", target);
                }
            } else {
                tracing::warn!("Connection '{}' not found during broadcast, skipping", target);
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    fn conn(id: &str) -> ConnectionId {
        ConnectionId::new(id.to_string()).unwrap()
    }

    #[tokio::test]
    async fn test_push_to_success() {
        // given:
        let pusher = WebSocketEventPusher::new();
        let (tx, mut rx) = mpsc::unbounded_channel();
        pusher.register_connection(conn("c1"), tx).await;

        // when:
        let result = pusher.push_to(&conn("c1"), "Hello").await;

        // then:
        assert!(result.is_ok());
        assert_eq!(rx.recv().await, Some("Hello".to_string()));
    }

    #[tokio::test]
    async fn test_push_to_unknown_connection_fails() {
        // given:
        let pusher = WebSocketEventPusher::new();

        // when:
        let result = pusher.push_to(&conn("nowhere"), "Hello").await;

        // then:
        assert!(matches!(
            result.unwrap_err(),
            PushError::ConnectionNotFound(_)
        ));
    }

    #[tokio::test]
    async fn test_broadcast_reaches_all_targets() {
        // given:
        let pusher = WebSocketEventPusher::new();
        let (tx1, mut rx1) = mpsc::unbounded_channel();
        let (tx2, mut rx2) = mpsc::unbounded_channel();
        pusher.register_connection(conn("c1"), tx1).await;
        pusher.register_connection(conn("c2"), tx2).await;

        // when:
        let result = pusher
            .broadcast(vec![conn("c1"), conn("c2")], "Broadcast message")
            .await;

        // then:
        assert!(result.is_ok());
        assert_eq!(rx1.recv().await, Some("Broadcast message".to_string()));
        assert_eq!(rx2.recv().await, Some("Broadcast message".to_string()));
    }

    #[tokio::test]
    async fn test_broadcast_tolerates_missing_target() {
        // given:
        let pusher = WebSocketEventPusher::new();
        let (tx1, mut rx1) = mpsc::unbounded_channel();
        pusher.register_connection(conn("c1"), tx1).await;

        // when: one target never registered
        let result = pusher
            .broadcast(vec![conn("c1"), conn("ghost")], "Broadcast message")
            .await;

        // then: the live target still receives the event
        assert!(result.is_ok());
        assert_eq!(rx1.recv().await, Some("Broadcast message".to_string()));
    }

    #[tokio::test]
    async fn test_broadcast_tolerates_closed_channel() {
        // given: c1's receiver is gone, c2 is healthy
        let pusher = WebSocketEventPusher::new();
        let (tx1, rx1) = mpsc::unbounded_channel();
        let (tx2, mut rx2) = mpsc::unbounded_channel();
        pusher.register_connection(conn("c1"), tx1).await;
        pusher.register_connection(conn("c2"), tx2).await;
        drop(rx1);

        // when:
        let result = pusher
            .broadcast(vec![conn("c1"), conn("c2")], "Broadcast message")
            .await;

        // then:
        assert!(result.is_ok());
        assert_eq!(rx2.recv().await, Some("Broadcast message".to_string()));
    }

    #[tokio::test]
    async fn test_unregister_removes_connection() {
        // given:
        let pusher = WebSocketEventPusher::new();
        let (tx, _rx) = mpsc::unbounded_channel();
        pusher.register_connection(conn("c1"), tx).await;
        assert_eq!(pusher.connection_count().await, 1);

        // when:
        pusher.unregister_connection(&conn("c1")).await;

        // then:
        assert_eq!(pusher.connection_count().await, 0);
        assert!(pusher.push_to(&conn("c1"), "Hello").await.is_err());
    }
}
