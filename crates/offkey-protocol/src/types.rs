//! Core wire types for Offkey's protocol.
//!
//! Event names and payload shapes mirror what the browser client sends:
//! snake_case event tags (`join_lobby`, `lobby_joined`, ...) with the
//! game-start payloads in camelCase (`lobbyId`, `gameMode`,
//! `assignedPrompt`).

use std::fmt;

use serde::{Deserialize, Serialize};

/// Lobby codes are exactly this many characters.
pub const CODE_LEN: usize = 6;

// ---------------------------------------------------------------------------
// LobbyCode
// ---------------------------------------------------------------------------

/// A 6-character lobby code over `A-Z0-9`, e.g. `A7B2X9`.
///
/// Codes are case-normalized to uppercase on input. The newtype keeps
/// normalized codes from mixing with raw client strings: everything past
/// the protocol boundary works with `LobbyCode`, never `&str`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LobbyCode(String);

impl LobbyCode {
    /// Normalizes raw client input: trims whitespace, uppercases.
    ///
    /// No length or charset check happens here — a malformed code simply
    /// never matches a live lobby and reports not-found downstream.
    pub fn normalized(input: &str) -> Self {
        Self(input.trim().to_uppercase())
    }

    /// Builds a code from an already-normalized string.
    ///
    /// Used by the code generator, which only produces valid charsets.
    pub fn from_generated(code: String) -> Self {
        debug_assert!(Self::is_well_formed(&code));
        Self(code)
    }

    /// Returns `true` if the string is exactly [`CODE_LEN`] characters
    /// from `A-Z0-9`.
    pub fn is_well_formed(s: &str) -> bool {
        s.len() == CODE_LEN
            && s.bytes()
                .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit())
    }

    /// Returns the code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LobbyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ---------------------------------------------------------------------------
// Players and settings
// ---------------------------------------------------------------------------

/// One lobby member as serialized to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerInfo {
    /// Unique within the owning lobby, case-sensitive.
    pub nickname: String,
    /// Set at game start for modes that distribute prompts.
    pub assigned_prompt: Option<String>,
    /// Pre-start readiness flag, reserved for the host screen.
    pub ready: bool,
    /// Reserved ordering field, unset until gameplay assigns it.
    pub index: Option<u32>,
}

/// Free-form lobby configuration captured at start time.
///
/// Field names are camelCase on the wire because they come straight from
/// the client's settings form. Everything is optional; absent fields
/// deserialize to `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GameSettings {
    /// Raw comma-separated prompt list, e.g. `"Song A, Song B"`.
    pub input_list: Option<String>,
    /// Round duration in seconds.
    pub round_duration: Option<u64>,
    /// Recording duration in seconds.
    pub rec_duration: Option<u64>,
    /// `"Public"` or `"Private"`; informational only at this layer.
    pub visibility: Option<String>,
}

/// Full lobby state as broadcast to a room on membership changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LobbySnapshot {
    /// The lobby's code.
    pub lobby: LobbyCode,
    /// All members, in join order.
    pub players: Vec<PlayerInfo>,
    /// Nickname of the player who created the lobby.
    pub host: String,
    /// Mode identifier, e.g. `"CLASSIC"`.
    pub game_mode: String,
    /// Settings recorded at start time (defaults before then).
    pub settings: GameSettings,
    /// Whether the game has started. Never goes back to `false`.
    pub game_started: bool,
}

// ---------------------------------------------------------------------------
// Faults
// ---------------------------------------------------------------------------

/// Client-input faults reported on a failed join.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JoinFault {
    /// The requested code names no live lobby.
    LobbyNotFound,
    /// The nickname is already taken in the target lobby.
    NicknameTaken,
}

impl fmt::Display for JoinFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LobbyNotFound => f.write_str("LOBBY_NOT_FOUND"),
            Self::NicknameTaken => f.write_str("NICKNAME_TAKEN"),
        }
    }
}

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

/// Inbound events from a client connection.
///
/// Internally tagged: `{"type": "join_lobby", "user": "...", ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientEvent {
    /// Join an existing lobby by code, or create one when `lobby` is blank.
    JoinLobby {
        user: String,
        #[serde(default)]
        lobby: String,
    },

    /// Leave the current lobby. Uses the connection's bound identity.
    LeaveLobby,

    /// Start the game in a lobby with the given mode and settings.
    #[serde(rename_all = "camelCase")]
    GameInit {
        lobby_id: String,
        game_mode: String,
        #[serde(default)]
        settings: GameSettings,
    },
}

/// Outbound notifications from the coordinator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerEvent {
    /// Room-wide: someone joined. Every member (including the joiner)
    /// receives the identical message with the full lobby snapshot.
    LobbyJoined {
        username: String,
        is_host: bool,
        #[serde(flatten)]
        snapshot: LobbySnapshot,
    },

    /// Room-wide: a member left and others remain.
    UserLeft { user: String },

    /// Room-wide: the host left before start; the lobby is gone.
    LobbyDismantled,

    /// Unicast to a requester whose join failed.
    JoinError { message: JoinFault },

    /// Unicast to a requester whose start-game failed.
    StartError { message: String },

    /// Unicast per member at game start; each recipient gets their own
    /// prompt, so this is never a room broadcast.
    #[serde(rename_all = "camelCase")]
    GameStart {
        game_mode: String,
        settings: GameSettings,
        assigned_prompt: Option<String>,
    },
}

// =========================================================================
// Tests
// =========================================================================
