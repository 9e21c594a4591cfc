//! Habit Mock - in-memory stand-in for the remote habit API
//!
//! Implements login plus the `/habits` CRUD routes with per-user storage.
//! Integration tests bind it to `127.0.0.1:0` via [`spawn`].

pub mod api;
pub mod config;
pub mod logger;
pub mod state;

pub use api::router;
pub use config::MockConfig;
pub use state::{AppState, DEMO_EMAIL, DEMO_PASSWORD, SharedState};

use std::net::SocketAddr;
use tokio::net::TcpListener;

/// Serve `state` on an already-bound listener until the task is dropped
pub async fn serve(listener: TcpListener, state: SharedState) -> std::io::Result<()> {
    axum::serve(listener, router(state)).await
}

/// Bind an ephemeral local port and serve in the background
///
/// Returns the bound address; the client base URL is `http://{addr}/api`.
pub async fn spawn(state: SharedState) -> std::io::Result<SocketAddr> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        if let Err(e) = serve(listener, state).await {
            tracing::error!(error = %e, "Mock server stopped");
        }
    });
    Ok(addr)
}
