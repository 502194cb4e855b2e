//! HTTP front door.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, TraceLayer span with request id)
//!     → handlers.rs
//!         /terminalId → terminal resolver (blocking pool)
//!         OPTIONS *   → preflight answer
//!         anything else → relay
//!     → cors.rs (Access-Control-Allow-Origin appended)
//!     → Send to client
//! ```

pub mod cors;
pub mod handlers;
pub mod server;

pub use server::{AppState, BuildError, HttpServer, TERMINAL_ID_PATH};
