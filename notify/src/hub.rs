//! In-process connection registry keyed by user identity.
//!
//! The `Hub` is the concrete `NotificationChannel` backing the WebSocket
//! endpoint. Each live connection registers an unbounded sender under its
//! user id and receives a connection id back; pushes fan out to every sender
//! of the target user and prune the ones whose receiving task has gone away.

use crate::errors::NotifyError;
use crate::models::{PushMessage, UserId};
use crate::NotificationChannel;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::sync::RwLock;
use tracing::debug;

/// Identifies one registered connection of a user, so the transport task can
/// unregister exactly the connection it owns regardless of receiver
/// lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectionId(u64);

struct Connection {
    id: ConnectionId,
    tx: UnboundedSender<PushMessage>,
}

#[derive(Default)]
pub struct Hub {
    next_id: AtomicU64,
    connections: RwLock<HashMap<UserId, Vec<Connection>>>,
}

impl Hub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new connection for `user` and hands back its id together
    /// with the receiving end the transport task should drain. A user may
    /// hold several connections at once (multiple tabs, devices); each
    /// receives every push.
    pub async fn register(&self, user: UserId) -> (ConnectionId, UnboundedReceiver<PushMessage>) {
        let id = ConnectionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let (tx, rx) = mpsc::unbounded_channel();
        let mut connections = self.connections.write().await;
        connections.entry(user).or_default().push(Connection { id, tx });
        debug!(user = %user, "connection registered with hub");
        (id, rx)
    }

    /// Drops the given connection of `user`, along with any other
    /// connections whose receiver is already gone. Removal does not depend
    /// on the receiver having been dropped first.
    pub async fn disconnect(&self, user: UserId, connection: ConnectionId) {
        let mut connections = self.connections.write().await;
        if let Some(senders) = connections.get_mut(&user) {
            senders.retain(|c| c.id != connection && !c.tx.is_closed());
            if senders.is_empty() {
                connections.remove(&user);
                debug!(user = %user, "last connection removed from hub");
            }
        }
    }

    /// Number of users with at least one live connection.
    pub async fn connected_users(&self) -> usize {
        self.connections.read().await.len()
    }
}

#[async_trait]
impl NotificationChannel for Hub {
    async fn push(&self, user: UserId, message: &PushMessage) -> Result<(), NotifyError> {
        let mut connections = self.connections.write().await;
        let senders = connections
            .get_mut(&user)
            .ok_or(NotifyError::NotConnected(user))?;

        let mut delivered = 0usize;
        senders.retain(|c| match c.tx.send(message.clone()) {
            Ok(()) => {
                delivered += 1;
                true
            }
            Err(_) => false,
        });

        if senders.is_empty() {
            connections.remove(&user);
        }
        if delivered == 0 {
            return Err(NotifyError::AllConnectionsClosed(user));
        }
        debug!(user = %user, connections = delivered, kind = %message.kind, "pushed message");
        Ok(())
    }

    async fn is_connected(&self, user: UserId) -> bool {
        self.connections
            .read()
            .await
            .get(&user)
            .is_some_and(|senders| senders.iter().any(|c| !c.tx.is_closed()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn message() -> PushMessage {
        PushMessage::new("taskReminders", json!({"count": 1}))
    }

    #[tokio::test]
    async fn push_reaches_registered_connection() {
        let hub = Hub::new();
        let user = UserId(7);
        let (_, mut rx) = hub.register(user).await;

        hub.push(user, &message()).await.unwrap();

        let received = rx.recv().await.unwrap();
        assert_eq!(received.kind, "taskReminders");
    }

    #[tokio::test]
    async fn push_fans_out_to_every_connection_of_the_user() {
        let hub = Hub::new();
        let user = UserId(7);
        let (_, mut first) = hub.register(user).await;
        let (_, mut second) = hub.register(user).await;

        hub.push(user, &message()).await.unwrap();

        assert!(first.recv().await.is_some());
        assert!(second.recv().await.is_some());
    }

    #[tokio::test]
    async fn push_to_unknown_user_is_not_connected() {
        let hub = Hub::new();
        let err = hub.push(UserId(1), &message()).await.unwrap_err();
        assert!(matches!(err, NotifyError::NotConnected(UserId(1))));
    }

    #[tokio::test]
    async fn dropped_receiver_is_pruned_on_push() {
        let hub = Hub::new();
        let user = UserId(7);
        let (_, rx) = hub.register(user).await;
        drop(rx);

        let err = hub.push(user, &message()).await.unwrap_err();
        assert!(matches!(err, NotifyError::AllConnectionsClosed(_)));
        // Registry entry is gone, so the next push reports not connected.
        let err = hub.push(user, &message()).await.unwrap_err();
        assert!(matches!(err, NotifyError::NotConnected(_)));
        assert!(!hub.is_connected(user).await);
    }

    #[tokio::test]
    async fn disconnect_removes_the_connection_while_its_receiver_is_alive() {
        let hub = Hub::new();
        let user = UserId(7);
        let (connection, rx) = hub.register(user).await;

        // The transport task unregisters before its receiver is dropped;
        // the entry must not outlive the connection.
        hub.disconnect(user, connection).await;
        assert_eq!(hub.connected_users().await, 0);
        assert!(!hub.is_connected(user).await);

        drop(rx);
        assert_eq!(hub.connected_users().await, 0);
    }

    #[tokio::test]
    async fn disconnect_leaves_other_connections_of_the_user_open() {
        let hub = Hub::new();
        let user = UserId(7);
        let (closing, _rx_closing) = hub.register(user).await;
        let (_, mut open) = hub.register(user).await;

        hub.disconnect(user, closing).await;
        assert!(hub.is_connected(user).await);

        hub.push(user, &message()).await.unwrap();
        assert!(open.recv().await.is_some());
    }
}
