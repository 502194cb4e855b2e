//! OS signal handling.
//!
//! # Responsibilities
//! - Translate Ctrl+C and, on Unix, SIGTERM into service control requests
//!
//! # Design Decisions
//! - Uses Tokio's signal handling (async-safe)
//! - Only the first signal matters; the controller stops listening after it

use tokio::sync::mpsc;

use crate::lifecycle::service::ControlRequest;

/// Wait for the first stop signal and forward it to the controller.
pub async fn forward_signals(requests: mpsc::Sender<ControlRequest>) {
    let request = wait_for_signal().await;
    tracing::info!(request = ?request, "Signal received");
    let _ = requests.send(request).await;
}

#[cfg(unix)]
async fn wait_for_signal() -> ControlRequest {
    use tokio::signal::unix::{signal, SignalKind};

    let mut terminate = match signal(SignalKind::terminate()) {
        Ok(s) => s,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to install SIGTERM handler");
            return ctrl_c().await;
        }
    };

    tokio::select! {
        request = ctrl_c() => request,
        _ = terminate.recv() => ControlRequest::Shutdown,
    }
}

#[cfg(not(unix))]
async fn wait_for_signal() -> ControlRequest {
    ctrl_c().await
}

async fn ctrl_c() -> ControlRequest {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    ControlRequest::Stop
}
