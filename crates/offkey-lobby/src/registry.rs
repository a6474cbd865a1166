//! The two process-wide registries: lobbies by code, identities by
//! connection.
//!
//! Neither registry is thread-safe by itself; both are owned by the
//! [`Coordinator`](crate::Coordinator) and accessed under its lock.

use std::collections::HashMap;

use offkey_protocol::{ConnectionId, LobbyCode};

use crate::Lobby;

// ---------------------------------------------------------------------------
// ConnectionRegistry
// ---------------------------------------------------------------------------

/// What a connection currently is: a nickname inside a lobby.
///
/// Created on successful join, destroyed on exit. An identity never
/// migrates between lobbies; leaving and rejoining makes a fresh one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub nickname: String,
    pub lobby: LobbyCode,
}

/// Maps each live connection to its current identity. The single source
/// of truth for "who is this socket right now."
#[derive(Debug, Default)]
pub struct ConnectionRegistry {
    bindings: HashMap<ConnectionId, Identity>,
}

impl ConnectionRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an identity, overwriting any prior binding for the id.
    /// A well-behaved client never has a prior one.
    pub fn bind(&mut self, conn: ConnectionId, nickname: String, lobby: LobbyCode) {
        self.bindings.insert(conn, Identity { nickname, lobby });
    }

    /// Looks up the identity bound to a connection.
    pub fn lookup(&self, conn: ConnectionId) -> Option<&Identity> {
        self.bindings.get(&conn)
    }

    /// Removes and returns the prior binding. Idempotent: unbinding an
    /// already-removed id is a no-op returning `None`.
    pub fn unbind(&mut self, conn: ConnectionId) -> Option<Identity> {
        self.bindings.remove(&conn)
    }

    /// Drops every binding into the given lobby. Used on dismantle,
    /// where all remaining members are evicted at once.
    pub fn unbind_lobby(&mut self, lobby: &LobbyCode) -> usize {
        let before = self.bindings.len();
        self.bindings.retain(|_, id| id.lobby != *lobby);
        before - self.bindings.len()
    }

    /// Connections currently bound into the given lobby, with their
    /// nicknames.
    pub fn members_of(&self, lobby: &LobbyCode) -> Vec<(ConnectionId, String)> {
        self.bindings
            .iter()
            .filter(|(_, id)| id.lobby == *lobby)
            .map(|(conn, id)| (*conn, id.nickname.clone()))
            .collect()
    }

    /// Number of bound connections.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Returns `true` if nothing is bound.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

// ---------------------------------------------------------------------------
// LobbyRegistry
// ---------------------------------------------------------------------------

/// All live lobbies, keyed by code.
///
/// An entry exists if and only if its lobby has at least one player;
/// the coordinator removes the entry atomically with the last player.
#[derive(Debug, Default)]
pub struct LobbyRegistry {
    lobbies: HashMap<LobbyCode, Lobby>,
}

impl LobbyRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a freshly created lobby under its own code.
    pub fn insert(&mut self, lobby: Lobby) {
        self.lobbies.insert(lobby.code().clone(), lobby);
    }

    /// Returns `true` if a live lobby has this code.
    pub fn contains(&self, code: &LobbyCode) -> bool {
        self.lobbies.contains_key(code)
    }

    /// Looks up a lobby by code.
    pub fn get(&self, code: &LobbyCode) -> Option<&Lobby> {
        self.lobbies.get(code)
    }

    /// Looks up a lobby by code, mutably.
    pub fn get_mut(&mut self, code: &LobbyCode) -> Option<&mut Lobby> {
        self.lobbies.get_mut(code)
    }

    /// Removes and returns the lobby with this code.
    pub fn remove(&mut self, code: &LobbyCode) -> Option<Lobby> {
        self.lobbies.remove(code)
    }

    /// Number of live lobbies.
    pub fn len(&self) -> usize {
        self.lobbies.len()
    }

    /// Returns `true` if no lobby is live.
    pub fn is_empty(&self) -> bool {
        self.lobbies.is_empty()
    }
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn conn(id: u64) -> ConnectionId {
        ConnectionId::new(id)
    }

    fn code(s: &str) -> LobbyCode {
        LobbyCode::normalized(s)
    }

    #[test]
    fn test_bind_lookup_unbind_round_trip() {
        let mut reg = ConnectionRegistry::new();
        reg.bind(conn(1), "Alice".into(), code("A7B2X9"));

        let id = reg.lookup(conn(1)).expect("should be bound");
        assert_eq!(id.nickname, "Alice");
        assert_eq!(id.lobby, code("A7B2X9"));

        let removed = reg.unbind(conn(1)).expect("should return binding");
        assert_eq!(removed.nickname, "Alice");
        assert!(reg.lookup(conn(1)).is_none());
    }

    #[test]
    fn test_unbind_is_idempotent() {
        let mut reg = ConnectionRegistry::new();
        reg.bind(conn(1), "Alice".into(), code("A7B2X9"));
        reg.unbind(conn(1));

        assert!(reg.unbind(conn(1)).is_none(), "second unbind is a no-op");
    }

    #[test]
    fn test_bind_overwrites_prior_binding() {
        let mut reg = ConnectionRegistry::new();
        reg.bind(conn(1), "Alice".into(), code("A7B2X9"));
        reg.bind(conn(1), "Alice2".into(), code("B8C3Y1"));

        let id = reg.lookup(conn(1)).unwrap();
        assert_eq!(id.nickname, "Alice2");
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn test_unbind_lobby_evicts_all_members() {
        let mut reg = ConnectionRegistry::new();
        reg.bind(conn(1), "Alice".into(), code("A7B2X9"));
        reg.bind(conn(2), "Bob".into(), code("A7B2X9"));
        reg.bind(conn(3), "Carol".into(), code("B8C3Y1"));

        let evicted = reg.unbind_lobby(&code("A7B2X9"));

        assert_eq!(evicted, 2);
        assert!(reg.lookup(conn(1)).is_none());
        assert!(reg.lookup(conn(2)).is_none());
        assert!(reg.lookup(conn(3)).is_some(), "other lobby untouched");
    }

    #[test]
    fn test_members_of_filters_by_lobby() {
        let mut reg = ConnectionRegistry::new();
        reg.bind(conn(1), "Alice".into(), code("A7B2X9"));
        reg.bind(conn(2), "Bob".into(), code("B8C3Y1"));

        let members = reg.members_of(&code("A7B2X9"));
        assert_eq!(members, vec![(conn(1), "Alice".to_string())]);
    }

    #[test]
    fn test_lobby_registry_insert_get_remove() {
        let mut reg = LobbyRegistry::new();
        assert!(reg.is_empty());

        reg.insert(Lobby::new(code("A7B2X9"), "Alice"));
        assert!(reg.contains(&code("A7B2X9")));
        assert_eq!(reg.len(), 1);
        assert_eq!(reg.get(&code("A7B2X9")).unwrap().host(), "Alice");

        let removed = reg.remove(&code("A7B2X9")).expect("should remove");
        assert_eq!(removed.host(), "Alice");
        assert!(reg.is_empty());
        assert!(reg.remove(&code("A7B2X9")).is_none());
    }
}
