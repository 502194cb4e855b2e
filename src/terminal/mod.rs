//! Terminal identifier subsystem.
//!
//! # Data Flow
//! ```text
//! GET /terminalId
//!     → resolver.rs (scan <install_dir>/EMV for *.EMVTERM)
//!     → newest file by modification time
//!     → third line returned verbatim
//! ```

pub mod resolver;

pub use resolver::{resolve, ResolveError, TerminalIdResolver, TERMINAL_FILE_EXTENSION};
