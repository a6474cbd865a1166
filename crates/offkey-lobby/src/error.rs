//! Error types for the lobby layer.

use offkey_protocol::{JoinFault, LobbyCode};

/// Errors that can occur during lobby coordination.
#[derive(Debug, thiserror::Error)]
pub enum LobbyError {
    /// The code names no live lobby.
    #[error("lobby {0} not found")]
    NotFound(LobbyCode),

    /// The nickname is already taken in the target lobby.
    #[error("nickname {0:?} already taken in this lobby")]
    NicknameTaken(String),

    /// Start-game was requested by someone other than the lobby host.
    #[error("only the host may start the game")]
    NotHost,

    /// The lobby's game has already started; the start transition fires
    /// exactly once.
    #[error("game already started in lobby {0}")]
    AlreadyStarted(LobbyCode),

    /// Code generation hit its retry bound without finding a free code.
    /// At 36^6 possible codes this means the registry is effectively
    /// full or the RNG is broken; either way, fail loudly.
    #[error("lobby code generation exhausted its retry budget")]
    CodeSpaceExhausted,

    /// A mode policy fault (unknown mode, prompt pool too small).
    #[error(transparent)]
    Mode(#[from] offkey_modes::ModeError),
}

impl LobbyError {
    /// Maps client-input join faults to their wire representation.
    ///
    /// Returns `None` for faults that are not part of the join error
    /// surface (those are logged or reported as start errors instead).
    pub fn join_fault(&self) -> Option<JoinFault> {
        match self {
            Self::NotFound(_) => Some(JoinFault::LobbyNotFound),
            Self::NicknameTaken(_) => Some(JoinFault::NicknameTaken),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_fault_mapping() {
        let not_found = LobbyError::NotFound(LobbyCode::normalized("ZZZZZZ"));
        assert_eq!(not_found.join_fault(), Some(JoinFault::LobbyNotFound));

        let taken = LobbyError::NicknameTaken("Alice".into());
        assert_eq!(taken.join_fault(), Some(JoinFault::NicknameTaken));

        assert_eq!(LobbyError::NotHost.join_fault(), None);
        assert_eq!(LobbyError::CodeSpaceExhausted.join_fault(), None);
    }
}
