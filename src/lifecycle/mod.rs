//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Config → Build relay + resolver → Bind listener → Serve
//!
//! Service (service.rs):
//!     StartPending → Running → StopPending → Stopped
//!
//! Shutdown (shutdown.rs):
//!     Trigger (latched) → Stop accepting → Drain in-flight requests → Exit
//!
//! Signals (signals.rs):
//!     Ctrl+C → Stop, SIGTERM → Shutdown
//! ```
//!
//! # Design Decisions
//! - Ordered startup: config first, then handlers, then listener
//! - Ordered shutdown: stop accept, drain, close
//! - No forced deadline; in-flight requests are never cancelled

pub mod service;
pub mod shutdown;
pub mod signals;
pub mod startup;

pub use service::{ControlRequest, ServiceController, ServiceState};
pub use shutdown::Shutdown;
pub use startup::{start, RelayHandle, StartupError};
