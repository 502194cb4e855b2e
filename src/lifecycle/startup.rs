//! Startup orchestration.
//!
//! # Responsibilities
//! - Build the relay and resolver from configuration
//! - Bind the listener and begin accepting traffic
//! - Hand back a handle that can request graceful shutdown
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal and returned to the caller
//! - Listener binds last, after everything it serves is ready

use std::net::SocketAddr;

use thiserror::Error;
use tokio::task::JoinHandle;

use crate::config::RelayConfig;
use crate::http::{BuildError, HttpServer};
use crate::lifecycle::shutdown::Shutdown;
use crate::net::{self, ListenerError};

#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Listener(#[from] ListenerError),

    #[error(transparent)]
    Build(#[from] BuildError),

    #[error("server error: {0}")]
    Serve(#[from] std::io::Error),

    #[error("server task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// A running relay.
#[derive(Debug)]
pub struct RelayHandle {
    local_addr: SocketAddr,
    shutdown: Shutdown,
    task: JoinHandle<Result<(), std::io::Error>>,
}

impl RelayHandle {
    /// Address the listener actually bound.
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Stop accepting connections; in-flight requests run to completion.
    pub fn shutdown(&self) {
        self.shutdown.trigger();
    }

    /// A trigger that outlives the handle.
    pub fn shutdown_trigger(&self) -> Shutdown {
        self.shutdown.clone()
    }

    /// Wait for the server to stop.
    pub async fn wait(self) -> Result<(), StartupError> {
        self.task.await??;
        Ok(())
    }
}

/// Bring the relay up with the given configuration.
pub async fn start(config: RelayConfig) -> Result<RelayHandle, StartupError> {
    let listen_addr = config.listener.listen_addr.clone();
    let server = HttpServer::new(config)?;

    let listener = net::bind(&listen_addr).await?;
    let local_addr = listener.local_addr()?;

    let shutdown = Shutdown::new();
    let task = tokio::spawn(server.run(listener, shutdown.signalled()));

    Ok(RelayHandle {
        local_addr,
        shutdown,
        task,
    })
}
