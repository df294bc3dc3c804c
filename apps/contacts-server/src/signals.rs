use anyhow::Result;
use tokio::signal;

/// Signals that stop the HTTP server.
#[derive(Debug, Clone, Copy)]
enum ShutdownSignal {
    CtrlC,
    #[cfg(unix)]
    Sigterm,
}

/// Resolve once Ctrl+C or SIGTERM arrives.
///
/// If no signal handler can be installed the future never resolves and the
/// server keeps running.
pub async fn shutdown_signal() {
    match wait_for_shutdown().await {
        Ok(sig) => {
            tracing::info!(signal = ?sig, "Shutdown signal received, draining connections");
        }
        Err(e) => {
            tracing::error!(error = %e, "Signal handling failed, graceful shutdown disabled");
            std::future::pending::<()>().await;
        }
    }
}

async fn wait_for_shutdown() -> Result<ShutdownSignal> {
    tokio::select! {
        result = wait_ctrl_c() => result,
        result = wait_sigterm() => result,
    }
}

async fn wait_ctrl_c() -> Result<ShutdownSignal> {
    signal::ctrl_c().await?;
    Ok(ShutdownSignal::CtrlC)
}

#[cfg(unix)]
async fn wait_sigterm() -> Result<ShutdownSignal> {
    let mut handler = signal::unix::signal(signal::unix::SignalKind::terminate())?;
    handler.recv().await;
    Ok(ShutdownSignal::Sigterm)
}

#[cfg(not(unix))]
async fn wait_sigterm() -> Result<ShutdownSignal> {
    std::future::pending::<Result<ShutdownSignal>>().await
}
