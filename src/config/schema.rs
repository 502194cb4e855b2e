//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the relay.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration for the relay.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct RelayConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Gateway the relay forwards to.
    pub backend: BackendConfig,

    /// Cross-origin settings attached to every response.
    pub cors: CorsConfig,

    /// Where the gateway keeps its terminal configuration files.
    pub terminal: TerminalConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ListenerConfig {
    /// `host:port` to listen on (e.g., "localhost:4040").
    pub listen_addr: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            listen_addr: "localhost:4040".to_string(),
        }
    }
}

/// Backend (gateway) configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct BackendConfig {
    /// Base URL requests are forwarded to (e.g., "https://localhost:4041").
    pub base_url: String,

    /// Skip certificate verification for the backend.
    ///
    /// The gateway presents a self-signed certificate and only listens on
    /// localhost. This applies to the backend client only.
    pub accept_invalid_certs: bool,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "https://localhost:4041".to_string(),
            accept_invalid_certs: true,
        }
    }
}

/// CORS configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct CorsConfig {
    /// Value of `Access-Control-Allow-Origin` (e.g., "https://mywebsite.com").
    pub origin: String,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            origin: "*".to_string(),
        }
    }
}

/// Terminal configuration file location.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct TerminalConfig {
    /// Directory the gateway software is installed in.
    pub install_dir: PathBuf,
}

impl TerminalConfig {
    /// Directory holding the `.EMVTERM` files.
    pub fn terminal_dir(&self) -> PathBuf {
        self.install_dir.join("EMV")
    }
}

impl Default for TerminalConfig {
    fn default() -> Self {
        let install_dir = if cfg!(windows) {
            PathBuf::from("C:\\Shift4\\")
        } else {
            PathBuf::from("/opt/shift4")
        };
        Self { install_dir }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}
