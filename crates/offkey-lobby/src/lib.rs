//! Lobby session coordination for Offkey.
//!
//! This crate is the in-memory heart of the game: the registry of active
//! lobbies and connections, the join/leave/disconnect state machine,
//! unique-code generation, host-authority rules, and the prompt
//! distribution run at game start.
//!
//! # Key types
//!
//! - [`Coordinator`] — the event router; owns all lobby state
//! - [`Lobby`] / [`Player`] — the session aggregate and its members
//! - [`LobbyRegistry`] / [`ConnectionRegistry`] — the two process-wide maps
//! - [`Gateway`] — the injected room fan-out capability
//! - [`LobbyError`] — coordination faults
//!
//! # Concurrency
//!
//! Both registries live behind a single `tokio::sync::Mutex` inside the
//! coordinator, and the lock is held across each mutation *and* the
//! notifications it produces. Handlers for the same lobby therefore never
//! interleave: notification order always matches mutation order.

#![allow(async_fn_in_trait)]

mod code;
mod coordinator;
mod error;
mod gateway;
mod lobby;
mod registry;

pub use code::generate_code;
pub use coordinator::Coordinator;
pub use error::LobbyError;
pub use gateway::Gateway;
pub use lobby::{Lobby, Player};
pub use registry::{ConnectionRegistry, Identity, LobbyRegistry};
