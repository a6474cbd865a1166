//! # Offkey
//!
//! Lobby session coordinator for the Offkey party game.
//!
//! Players join by 6-character code, the host configures and starts the
//! game, and each player receives their prompt at start. This meta-crate
//! wires the layers together: WebSocket transport, JSON protocol, and
//! the lobby coordinator.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use offkey::OffkeyServer;
//!
//! # async fn run() -> Result<(), offkey::OffkeyError> {
//! let server = OffkeyServer::builder().bind("0.0.0.0:8000").build().await?;
//! server.run().await
//! # }
//! ```

mod error;
mod gateway;
mod handler;
mod server;

pub use error::OffkeyError;
pub use gateway::FanoutGateway;
pub use server::{OffkeyServer, OffkeyServerBuilder};

// The layers, re-exported for embedders.
pub use offkey_lobby::{Coordinator, Gateway, LobbyError};
pub use offkey_modes::{DEFAULT_SONG_LIST, GameMode};
pub use offkey_protocol::{
    CODE_LEN, ClientEvent, GameSettings, JoinFault, LobbyCode, LobbySnapshot, PlayerInfo,
    ServerEvent,
};
pub use offkey_transport::ConnectionId;
