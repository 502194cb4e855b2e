//! CORS relay subsystem.
//!
//! # Data Flow
//! ```text
//! Inbound request (any method but OPTIONS)
//!     → headers.rs (copy headers, drop Host)
//!     → forward.rs (rebuild URL on backend origin, stream body)
//!     → backend response
//!     → headers.rs (copy headers back)
//!     → streamed to client, CORS origin appended by the HTTP layer
//! ```

pub mod forward;
pub mod headers;

pub use forward::Relay;
pub use headers::{copy_headers, outbound_headers};
