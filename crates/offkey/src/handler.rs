//! Per-connection handler: decode client events, route to the
//! coordinator, and pump coordinator notifications back out.
//!
//! Each accepted connection gets its own Tokio task running this
//! handler, plus a writer task draining that connection's outbound
//! channel. The reader never writes to the socket directly; every
//! outbound event, including error replies, goes through the gateway so
//! ordering matches the coordinator's lock.

use std::sync::Arc;

use offkey_lobby::Gateway;
use offkey_protocol::{ClientEvent, Codec, ServerEvent};
use offkey_transport::{Connection, WebSocketConnection};

use crate::OffkeyError;
use crate::server::ServerState;

/// Handles a single connection from accept to close.
pub(crate) async fn handle_connection(
    conn: WebSocketConnection,
    state: Arc<ServerState>,
) -> Result<(), OffkeyError> {
    let conn_id = conn.id();
    tracing::debug!(%conn_id, "handling new connection");

    let outbound = state.gateway.register(conn_id).await;
    let conn = Arc::new(conn);
    let writer = tokio::spawn(write_loop(Arc::clone(&conn), Arc::clone(&state), outbound));

    let result = read_loop(&conn, &state).await;

    // Teardown mirrors a voluntary leave; the coordinator treats both
    // identically once the binding is gone.
    state.coordinator.handle_exit(conn_id).await;
    state.gateway.deregister(conn_id).await;
    writer.abort();
    tracing::debug!(%conn_id, "connection handler finished");

    result
}

/// Drains the outbound channel into the socket until either end closes.
async fn write_loop(
    conn: Arc<WebSocketConnection>,
    state: Arc<ServerState>,
    mut outbound: tokio::sync::mpsc::UnboundedReceiver<ServerEvent>,
) {
    while let Some(event) = outbound.recv().await {
        let bytes = match state.codec.encode(&event) {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::error!(conn_id = %conn.id(), error = %e, "failed to encode event");
                continue;
            }
        };
        if let Err(e) = conn.send(&bytes).await {
            tracing::debug!(conn_id = %conn.id(), error = %e, "outbound send failed");
            break;
        }
    }
}

/// Receives and dispatches client events until the connection ends.
async fn read_loop(
    conn: &WebSocketConnection,
    state: &Arc<ServerState>,
) -> Result<(), OffkeyError> {
    let conn_id = conn.id();

    loop {
        let data = match conn.recv().await {
            Ok(Some(data)) => data,
            Ok(None) => {
                tracing::debug!(%conn_id, "connection closed cleanly");
                return Ok(());
            }
            Err(e) => {
                tracing::debug!(%conn_id, error = %e, "recv error");
                return Err(OffkeyError::Transport(e));
            }
        };

        let event: ClientEvent = match state.codec.decode(&data) {
            Ok(event) => event,
            Err(e) => {
                // Malformed frames are the client's problem; keep serving.
                tracing::debug!(%conn_id, error = %e, "failed to decode client event");
                continue;
            }
        };

        match event {
            ClientEvent::JoinLobby { user, lobby } => {
                if let Err(e) = state.coordinator.join_lobby(conn_id, &user, &lobby).await {
                    match e.join_fault() {
                        Some(fault) => {
                            state
                                .gateway
                                .unicast(conn_id, ServerEvent::JoinError { message: fault })
                                .await;
                        }
                        None => {
                            tracing::error!(%conn_id, error = %e, "join failed");
                        }
                    }
                }
            }

            ClientEvent::LeaveLobby => {
                state.coordinator.handle_exit(conn_id).await;
            }

            ClientEvent::GameInit {
                lobby_id,
                game_mode,
                settings,
            } => {
                if let Err(e) = state
                    .coordinator
                    .start_game(conn_id, &lobby_id, &game_mode, settings)
                    .await
                {
                    tracing::debug!(%conn_id, error = %e, "start rejected");
                    state
                        .gateway
                        .unicast(
                            conn_id,
                            ServerEvent::StartError {
                                message: e.to_string(),
                            },
                        )
                        .await;
                }
            }
        }
    }
}
