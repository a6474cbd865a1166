//! Room fan-out over per-connection outbound channels.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use tokio::sync::{Mutex, mpsc};

use offkey_lobby::Gateway;
use offkey_protocol::{ConnectionId, LobbyCode, ServerEvent};

/// Routes server events to connections through unbounded channels.
///
/// Each connection registers an outbound channel whose receiver is
/// drained by that connection's writer task. Delivery is best effort:
/// sends to deregistered connections are silently dropped, matching the
/// coordinator's fire-and-forget notification contract.
#[derive(Clone, Default)]
pub struct FanoutGateway {
    inner: Arc<Mutex<FanoutInner>>,
}

#[derive(Default)]
struct FanoutInner {
    senders: HashMap<ConnectionId, mpsc::UnboundedSender<ServerEvent>>,
    rooms: HashMap<LobbyCode, HashSet<ConnectionId>>,
}

impl FanoutGateway {
    /// Creates an empty gateway.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a connection's outbound channel and returns the
    /// receiving end for its writer task.
    pub async fn register(&self, conn: ConnectionId) -> mpsc::UnboundedReceiver<ServerEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.inner.lock().await.senders.insert(conn, tx);
        rx
    }

    /// Drops a connection's channel. Later events for it go nowhere.
    pub async fn deregister(&self, conn: ConnectionId) {
        self.inner.lock().await.senders.remove(&conn);
    }
}

impl Gateway for FanoutGateway {
    async fn add_to_room(&self, conn: ConnectionId, room: &LobbyCode) {
        self.inner
            .lock()
            .await
            .rooms
            .entry(room.clone())
            .or_default()
            .insert(conn);
    }

    async fn remove_from_room(&self, conn: ConnectionId, room: &LobbyCode) {
        let mut inner = self.inner.lock().await;
        if let Some(members) = inner.rooms.get_mut(room) {
            members.remove(&conn);
            if members.is_empty() {
                inner.rooms.remove(room);
            }
        }
    }

    async fn drop_room(&self, room: &LobbyCode) {
        self.inner.lock().await.rooms.remove(room);
    }

    async fn broadcast(&self, room: &LobbyCode, event: ServerEvent) {
        let inner = self.inner.lock().await;
        let Some(members) = inner.rooms.get(room) else {
            return;
        };
        for conn in members {
            if let Some(tx) = inner.senders.get(conn) {
                // A closed receiver means the writer task is gone; the
                // connection teardown path cleans up the rest.
                let _ = tx.send(event.clone());
            }
        }
    }

    async fn unicast(&self, conn: ConnectionId, event: ServerEvent) {
        if let Some(tx) = self.inner.lock().await.senders.get(&conn) {
            let _ = tx.send(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn conn(id: u64) -> ConnectionId {
        ConnectionId::new(id)
    }

    fn code(s: &str) -> LobbyCode {
        LobbyCode::normalized(s)
    }

    #[tokio::test]
    async fn test_broadcast_reaches_all_room_members() {
        let gateway = FanoutGateway::new();
        let mut rx1 = gateway.register(conn(1)).await;
        let mut rx2 = gateway.register(conn(2)).await;
        gateway.add_to_room(conn(1), &code("A7B2X9")).await;
        gateway.add_to_room(conn(2), &code("A7B2X9")).await;

        gateway
            .broadcast(&code("A7B2X9"), ServerEvent::LobbyDismantled)
            .await;

        assert_eq!(rx1.recv().await, Some(ServerEvent::LobbyDismantled));
        assert_eq!(rx2.recv().await, Some(ServerEvent::LobbyDismantled));
    }

    #[tokio::test]
    async fn test_broadcast_skips_other_rooms() {
        let gateway = FanoutGateway::new();
        let mut rx = gateway.register(conn(1)).await;
        gateway.add_to_room(conn(1), &code("B8C3Y1")).await;

        gateway
            .broadcast(&code("A7B2X9"), ServerEvent::LobbyDismantled)
            .await;

        assert!(rx.try_recv().is_err(), "member of another room got event");
    }

    #[tokio::test]
    async fn test_unicast_targets_one_connection() {
        let gateway = FanoutGateway::new();
        let mut rx1 = gateway.register(conn(1)).await;
        let mut rx2 = gateway.register(conn(2)).await;

        gateway
            .unicast(conn(1), ServerEvent::UserLeft { user: "Bob".into() })
            .await;

        assert!(rx1.recv().await.is_some());
        assert!(rx2.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_send_after_deregister_is_dropped() {
        let gateway = FanoutGateway::new();
        let _rx = gateway.register(conn(1)).await;
        gateway.add_to_room(conn(1), &code("A7B2X9")).await;
        gateway.deregister(conn(1)).await;

        // Must not panic or error.
        gateway
            .broadcast(&code("A7B2X9"), ServerEvent::LobbyDismantled)
            .await;
        gateway.unicast(conn(1), ServerEvent::LobbyDismantled).await;
    }

    #[tokio::test]
    async fn test_drop_room_clears_membership() {
        let gateway = FanoutGateway::new();
        let mut rx = gateway.register(conn(1)).await;
        gateway.add_to_room(conn(1), &code("A7B2X9")).await;

        gateway.drop_room(&code("A7B2X9")).await;
        gateway
            .broadcast(&code("A7B2X9"), ServerEvent::LobbyDismantled)
            .await;

        assert!(rx.try_recv().is_err(), "dropped room still delivered");
    }
}
