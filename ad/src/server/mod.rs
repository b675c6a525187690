//! HTTP transport for the applier
//!
//! A thin axum front: decodes command JSON and forwards it to the applier
//! handle it was constructed with. No globals; whoever builds the server
//! passes the applier in.

mod routes;

pub use routes::{AppState, create_router};

use std::net::SocketAddr;
use std::sync::Arc;

use eyre::{Context, Result};
use tokio::signal;
use tracing::{info, warn};

use crate::applier::Applier;

/// Serve the HTTP API until interrupted, then stop the applier.
///
/// A shutdown-handshake failure from the applier propagates out of here;
/// at that point the worker state is no longer trustworthy and the process
/// should exit.
pub async fn serve(port: u16, applier: Arc<Applier>) -> Result<()> {
    applier.start().await.context("Failed to start applier")?;

    let app = create_router(applier.clone());
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context(format!("Failed to bind {addr}"))?;

    info!("listening on http://{addr}");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    info!("listener done");
    applier.stop().await.context("Failed to stop applier")?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        warn!(error = %e, "failed to install ctrl-c handler");
        return;
    }
    info!("received shutdown signal");
}
