//! Transport-layer faults.

/// Errors produced by [`Transport`](crate::Transport) and
/// [`Connection`](crate::Connection) implementations.
///
/// A clean close is not an error: `recv` signals it with `Ok(None)` and
/// the handler tears the connection down normally.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// An outbound frame could not be written.
    #[error("send failed: {0}")]
    SendFailed(#[source] std::io::Error),

    /// An inbound frame could not be read.
    #[error("receive failed: {0}")]
    ReceiveFailed(#[source] std::io::Error),

    /// Binding the listener or accepting a new connection failed.
    #[error("accept failed: {0}")]
    AcceptFailed(#[source] std::io::Error),
}
