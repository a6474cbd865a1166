//! `OffkeyServer` builder and accept loop.
//!
//! This is the entry point for running an Offkey lobby server. It ties
//! together all the layers: transport → protocol → lobby coordination.

use std::sync::Arc;

use offkey_lobby::Coordinator;
use offkey_protocol::JsonCodec;
use offkey_transport::{Transport, WebSocketTransport};

use crate::OffkeyError;
use crate::gateway::FanoutGateway;
use crate::handler::handle_connection;

/// Shared server state passed to each connection handler task.
///
/// Wrapped in `Arc` so it can be cheaply cloned across tasks. The
/// coordinator carries its own lock; the gateway is internally shared.
pub(crate) struct ServerState {
    pub(crate) coordinator: Coordinator<FanoutGateway>,
    pub(crate) gateway: FanoutGateway,
    pub(crate) codec: JsonCodec,
}

/// Builder for configuring and starting an Offkey server.
///
/// # Example
///
/// ```rust,ignore
/// let server = OffkeyServer::builder()
///     .bind("0.0.0.0:8000")
///     .build()
///     .await?;
/// server.run().await
/// ```
pub struct OffkeyServerBuilder {
    bind_addr: String,
}

impl OffkeyServerBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            bind_addr: "127.0.0.1:8000".to_string(),
        }
    }

    /// Sets the address to bind the server to.
    pub fn bind(mut self, addr: &str) -> Self {
        self.bind_addr = addr.to_string();
        self
    }

    /// Builds the server, binding its WebSocket listener.
    ///
    /// Uses `JsonCodec` and `WebSocketTransport`, which is what the
    /// browser client speaks.
    pub async fn build(self) -> Result<OffkeyServer, OffkeyError> {
        let transport = WebSocketTransport::bind(&self.bind_addr).await?;

        let gateway = FanoutGateway::new();
        let state = Arc::new(ServerState {
            coordinator: Coordinator::new(gateway.clone()),
            gateway,
            codec: JsonCodec,
        });

        Ok(OffkeyServer { transport, state })
    }
}

impl Default for OffkeyServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A running Offkey lobby server.
///
/// Call [`run()`](Self::run) to start accepting connections.
pub struct OffkeyServer {
    transport: WebSocketTransport,
    state: Arc<ServerState>,
}

impl OffkeyServer {
    /// Creates a new builder.
    pub fn builder() -> OffkeyServerBuilder {
        OffkeyServerBuilder::new()
    }

    /// Returns the local address the server is bound to.
    pub fn local_addr(&self) -> std::io::Result<std::net::SocketAddr> {
        self.transport.local_addr()
    }

    /// Runs the server accept loop.
    ///
    /// Spawns a handler task for each accepted connection. Runs until
    /// the process is terminated.
    pub async fn run(mut self) -> Result<(), OffkeyError> {
        tracing::info!("Offkey server running");

        loop {
            match self.transport.accept().await {
                Ok(conn) => {
                    let state = Arc::clone(&self.state);
                    tokio::spawn(async move {
                        if let Err(e) = handle_connection(conn, state).await {
                            tracing::debug!(error = %e, "connection ended with error");
                        }
                    });
                }
                Err(e) => {
                    tracing::error!(error = %e, "accept failed");
                }
            }
        }
    }
}
