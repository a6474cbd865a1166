//! Wire protocol for Offkey.
//!
//! This crate defines the language clients and the server speak:
//!
//! - **Types** ([`ClientEvent`], [`ServerEvent`], [`LobbyCode`],
//!   [`LobbySnapshot`], etc.) — the structures that travel on the wire.
//! - **Codec** ([`Codec`] trait, [`JsonCodec`]) — how those messages are
//!   converted to and from bytes.
//! - **Errors** ([`ProtocolError`]) — what can go wrong while encoding
//!   or decoding.
//!
//! The protocol layer sits between transport (raw bytes) and the lobby
//! coordinator (session state). It doesn't know about connections or
//! lobbies — it only knows how to name and serialize events.

mod codec;
mod error;
mod types;

pub use codec::Codec;
#[cfg(feature = "json")]
pub use codec::JsonCodec;
pub use error::ProtocolError;
pub use types::{
    ClientEvent, GameSettings, JoinFault, LobbyCode, LobbySnapshot, PlayerInfo,
    ServerEvent, CODE_LEN,
};

// Re-export so downstream crates don't need a direct transport dependency
// just to name a connection.
pub use offkey_transport::ConnectionId;
