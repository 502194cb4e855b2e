//! Service state machine.
//!
//! Mirrors what a platform service manager expects from a managed process:
//!
//! ```text
//! StartPending → Running → StopPending → Stopped
//!                   │                       ▲
//!                   └── server exits ───────┘
//! ```
//!
//! Control requests arrive on a channel (from OS signals or a service
//! manager adapter). The only capability used on the relay is shutdown.

use tokio::sync::{mpsc, watch};

use crate::lifecycle::startup::{RelayHandle, StartupError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceState {
    StartPending,
    Running,
    StopPending,
    Stopped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlRequest {
    /// Report the current state.
    Interrogate,
    Stop,
    /// System is going down.
    Shutdown,
}

pub struct ServiceController {
    status: watch::Sender<ServiceState>,
}

impl ServiceController {
    pub fn new() -> Self {
        let (status, _) = watch::channel(ServiceState::StartPending);
        Self { status }
    }

    /// Observe state transitions.
    pub fn status(&self) -> watch::Receiver<ServiceState> {
        self.status.subscribe()
    }

    pub fn state(&self) -> ServiceState {
        *self.status.borrow()
    }

    fn transition(&self, to: ServiceState) {
        let from = self.status.send_replace(to);
        tracing::info!(from = ?from, to = ?to, "Service state changed");
    }

    /// Drive the relay until a stop request arrives or the server exits.
    ///
    /// A closed request channel counts as a stop request.
    pub async fn run(
        self,
        relay: RelayHandle,
        mut requests: mpsc::Receiver<ControlRequest>,
    ) -> Result<(), StartupError> {
        let shutdown = relay.shutdown_trigger();
        let server = relay.wait();
        tokio::pin!(server);

        self.transition(ServiceState::Running);

        loop {
            tokio::select! {
                result = &mut server => {
                    if let Err(e) = &result {
                        tracing::error!(error = %e, "Relay stopped unexpectedly");
                    }
                    self.transition(ServiceState::Stopped);
                    return result;
                }
                request = requests.recv() => {
                    match request {
                        Some(ControlRequest::Interrogate) => {
                            tracing::info!(state = ?self.state(), "Service interrogated");
                        }
                        Some(ControlRequest::Stop) | Some(ControlRequest::Shutdown) | None => {
                            self.transition(ServiceState::StopPending);
                            shutdown.trigger();
                            let result = (&mut server).await;
                            self.transition(ServiceState::Stopped);
                            return result;
                        }
                    }
                }
            }
        }
    }
}

impl Default for ServiceController {
    fn default() -> Self {
        Self::new()
    }
}
