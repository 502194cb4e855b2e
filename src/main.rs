//! Local CORS relay for the payment-terminal gateway.
//!
//! # Architecture Overview
//!
//! ```text
//!                        ┌──────────────────────────────────────────────┐
//!                        │                  UTG RELAY                   │
//!    Browser request     │  ┌──────────┐    ┌────────────┐              │
//!    ────────────────────┼─▶│   net    │───▶│   http     │              │
//!                        │  │ listener │    │  router    │              │
//!                        │  └──────────┘    └─────┬──────┘              │
//!                        │            /terminalId │  everything else    │
//!                        │               ┌────────┴────────┐            │
//!                        │               ▼                 ▼            │
//!                        │        ┌────────────┐    ┌────────────┐      │
//!                        │        │  terminal  │    │   relay    │──────┼──▶ Gateway
//!                        │        │  resolver  │    │  forward   │◀─────┼─── (HTTPS,
//!                        │        └─────┬──────┘    └────────────┘      │    self-signed)
//!                        │              ▼                               │
//!                        │       <install>/EMV/*.EMVTERM                │
//!                        │                                              │
//!                        │  config · lifecycle · observability          │
//!                        └──────────────────────────────────────────────┘
//! ```

use std::process::ExitCode;

use clap::Parser;
use tokio::sync::mpsc;

use utg_relay::config::Args;
use utg_relay::lifecycle::{self, signals, ServiceController};
use utg_relay::observability::{logging, metrics};

#[tokio::main]
async fn main() -> ExitCode {
    let config = match Args::parse().into_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("utg-relay: {e}");
            return ExitCode::FAILURE;
        }
    };

    logging::init_logging(&config.observability.log_level);

    tracing::info!("utg-relay v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        listen_addr = %config.listener.listen_addr,
        backend = %config.backend.base_url,
        origin = %config.cors.origin,
        terminal_dir = %config.terminal.terminal_dir().display(),
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        if let Ok(addr) = config.observability.metrics_address.parse() {
            metrics::init_metrics(addr);
        } else {
            tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            );
        }
    }

    let relay = match lifecycle::start(config).await {
        Ok(relay) => relay,
        Err(e) => {
            tracing::error!(error = %e, "Relay encountered an unrecoverable error");
            return ExitCode::FAILURE;
        }
    };

    let (control_tx, control_rx) = mpsc::channel(4);
    tokio::spawn(signals::forward_signals(control_tx));

    match ServiceController::new().run(relay, control_rx).await {
        Ok(()) => {
            tracing::info!("Shutdown complete");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "Relay stopped with an error");
            ExitCode::FAILURE
        }
    }
}
