//! The broadcast capability the coordinator is injected with.

use offkey_protocol::{ConnectionId, LobbyCode, ServerEvent};

/// Delivers targeted and room-wide messages.
///
/// The coordinator never talks to sockets directly; it manipulates room
/// membership and emits events through this trait. Delivery is best
/// effort: implementations drop sends to connections that are gone, and
/// the coordinator never retries.
pub trait Gateway: Send + Sync + 'static {
    /// Adds a connection to a lobby's broadcast room.
    async fn add_to_room(&self, conn: ConnectionId, room: &LobbyCode);

    /// Removes a connection from a lobby's broadcast room.
    async fn remove_from_room(&self, conn: ConnectionId, room: &LobbyCode);

    /// Tears down a room entirely. Called when its lobby is deleted, so
    /// membership never outlives the lobby (codes can be regenerated).
    async fn drop_room(&self, room: &LobbyCode);

    /// Sends an event to every member of a room.
    async fn broadcast(&self, room: &LobbyCode, event: ServerEvent);

    /// Sends an event to one connection.
    async fn unicast(&self, conn: ConnectionId, event: ServerEvent);
}
