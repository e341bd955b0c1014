//! Gateway server lifecycle.
//!
//! bind → spawn background task → return handle with shutdown channel.

use std::net::SocketAddr;

use axum::Router;
use serde::{Deserialize, Serialize};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use uuid::Uuid;

/// Session metadata for a running gateway server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSession {
    pub session_id: String,
    pub server_addr: String,
    pub port: u16,
    pub started_at: String,
}

/// Handle to a running gateway server.
pub struct GatewayServer {
    pub session: ServerSession,
    shutdown_tx: Option<oneshot::Sender<()>>,
    handle: JoinHandle<()>,
}

impl GatewayServer {
    /// Shut down the server gracefully. Safe to call twice.
    pub fn shutdown(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
            tracing::info!("Gateway server shutdown signal sent");
        }
    }

    /// Wait for the serving task to finish.
    pub async fn wait(self) {
        if let Err(e) = self.handle.await {
            tracing::error!("Gateway server task failed: {e}");
        }
    }
}

/// Bind `addr` and serve `app` in a background tokio task.
///
/// Port `0` picks an ephemeral port; the bound one is in `session.port`.
pub async fn start_server_on(addr: SocketAddr, app: Router) -> Result<GatewayServer, String> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| format!("Failed to bind gateway server on {addr}: {e}"))?;

    let addr = listener
        .local_addr()
        .map_err(|e| format!("Failed to get server address: {e}"))?;

    let session = ServerSession {
        session_id: Uuid::new_v4().to_string(),
        server_addr: addr.to_string(),
        port: addr.port(),
        started_at: chrono::Utc::now().to_rfc3339(),
    };

    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    let handle = tokio::spawn(async move {
        let shutdown_signal = async move {
            let _ = shutdown_rx.await;
            tracing::info!("Gateway server received shutdown signal");
        };

        tracing::info!(%addr, "Gateway server started");

        if let Err(e) = axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal)
            .await
        {
            tracing::error!("Gateway server error: {e}");
        }

        tracing::info!("Gateway server stopped");
    });

    Ok(GatewayServer {
        session,
        shutdown_tx: Some(shutdown_tx),
        handle,
    })
}
