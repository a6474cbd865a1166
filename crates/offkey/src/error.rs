//! Unified error type for the Offkey server.

use offkey_lobby::LobbyError;
use offkey_protocol::ProtocolError;
use offkey_transport::TransportError;

/// Top-level error that wraps all crate-specific errors.
///
/// When using the `offkey` meta-crate, you deal with this single error
/// type instead of importing errors from each sub-crate. The `#[from]`
/// attribute on each variant auto-generates `From` impls, so the `?`
/// operator converts sub-crate errors automatically.
#[derive(Debug, thiserror::Error)]
pub enum OffkeyError {
    /// A transport-level error (send, recv, accept).
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A protocol-level error (encode, decode).
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// A coordination-level error (lobby not found, host rules, modes).
    #[error(transparent)]
    Lobby(#[from] LobbyError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use offkey_protocol::{ClientEvent, Codec, JsonCodec};

    #[test]
    fn test_from_transport_error() {
        let err = TransportError::SendFailed(std::io::Error::new(
            std::io::ErrorKind::BrokenPipe,
            "gone",
        ));
        let offkey_err: OffkeyError = err.into();
        assert!(matches!(offkey_err, OffkeyError::Transport(_)));
        assert!(offkey_err.to_string().contains("gone"));
    }

    #[test]
    fn test_from_protocol_error() {
        let err = JsonCodec
            .decode::<ClientEvent>(b"not json")
            .expect_err("garbage must not decode");
        let offkey_err: OffkeyError = err.into();
        assert!(matches!(
            offkey_err,
            OffkeyError::Protocol(ProtocolError::Decode(_))
        ));
    }

    #[test]
    fn test_from_lobby_error() {
        let err = LobbyError::NotHost;
        let offkey_err: OffkeyError = err.into();
        assert!(matches!(offkey_err, OffkeyError::Lobby(_)));
    }
}
