//! Graceful shutdown signal handling

use std::{io, time::Duration};

use salvo::server::ServerHandle;
use thiserror::Error;
use tokio::signal;
use tracing::info;

/// How long in-flight requests get to finish once a signal arrives.
const DRAIN_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Error)]
pub(crate) enum ShutdownSignalError {
    #[error("failed to install Ctrl+C handler: {0}")]
    CtrlC(#[source] io::Error),

    #[cfg(unix)]
    #[error("failed to install SIGTERM handler: {0}")]
    SigTerm(#[source] io::Error),
}

/// Wait for Ctrl+C (or SIGTERM on Unix), then stop accepting connections and
/// let in-flight requests drain.
pub(crate) async fn listen(handle: ServerHandle) -> Result<(), ShutdownSignalError> {
    let signal = wait_for_signal().await?;

    info!(signal, "shutdown signal received, draining requests");

    handle.stop_graceful(Some(DRAIN_TIMEOUT));

    Ok(())
}

async fn wait_for_signal() -> Result<&'static str, ShutdownSignalError> {
    let ctrl_c = async { signal::ctrl_c().await.map_err(ShutdownSignalError::CtrlC) };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .map_err(ShutdownSignalError::SigTerm)?
            .recv()
            .await;

        Ok::<(), ShutdownSignalError>(())
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<Result<(), ShutdownSignalError>>();

    tokio::select! {
        result = ctrl_c => result.map(|()| "ctrl_c"),
        result = terminate => result.map(|()| "terminate"),
    }
}
