//! Standalone Offkey lobby server.
//!
//! Binds to `OFFKEY_ADDR` (default `0.0.0.0:8000`) and serves the
//! WebSocket lobby protocol. Log verbosity follows `RUST_LOG`.

use offkey::{OffkeyError, OffkeyServer};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), OffkeyError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let addr = std::env::var("OFFKEY_ADDR").unwrap_or_else(|_| "0.0.0.0:8000".to_string());

    let server = OffkeyServer::builder().bind(&addr).build().await?;
    server.run().await
}
