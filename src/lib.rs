//! Local CORS relay for a payment-terminal gateway.
//!
//! The gateway only listens on localhost with a self-signed certificate, so
//! browsers cannot call it directly. The relay forwards any request to it,
//! appends `Access-Control-Allow-Origin` to every response and answers
//! preflights itself. `GET /terminalId` reports the terminal the gateway is
//! currently bound to, read from its configuration files.

pub mod config;
pub mod error;
pub mod http;
pub mod lifecycle;
pub mod net;
pub mod observability;
pub mod relay;
pub mod terminal;

pub use config::RelayConfig;
pub use error::RelayError;
pub use http::HttpServer;
pub use lifecycle::{start, RelayHandle, Shutdown};
