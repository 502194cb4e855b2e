//! Command-line flags.
//!
//! Flags override values from the optional config file, which in turn
//! override the built-in defaults.

use std::path::PathBuf;

use clap::Parser;

use crate::config::loader::{finalize, parse_config_file, ConfigError};
use crate::config::schema::RelayConfig;

#[derive(Debug, Default, Parser)]
#[command(name = "utg-relay")]
#[command(about = "Local CORS relay in front of the payment gateway", long_about = None)]
pub struct Args {
    /// TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// host:port this server should listen on, e.g. localhost:4040
    #[arg(long = "listenAddr")]
    pub listen_addr: Option<String>,

    /// Base URL the gateway is running on, e.g. https://localhost:4041
    #[arg(long = "utgBaseURL")]
    pub utg_base_url: Option<String>,

    /// Origin your browser will be calling from, e.g. https://mywebsite.com
    #[arg(long = "originURL")]
    pub origin_url: Option<String>,

    /// Directory the gateway software is installed in
    #[arg(long = "utgInstallDir")]
    pub utg_install_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Serve Prometheus metrics on this address
    #[arg(long)]
    pub metrics_address: Option<String>,
}

impl Args {
    /// Assemble the final configuration: defaults, then file, then flags.
    pub fn into_config(self) -> Result<RelayConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => parse_config_file(path)?,
            None => RelayConfig::default(),
        };
        self.apply(&mut config);
        finalize(config)
    }

    fn apply(self, config: &mut RelayConfig) {
        if let Some(addr) = self.listen_addr {
            config.listener.listen_addr = addr;
        }
        if let Some(url) = self.utg_base_url {
            config.backend.base_url = url;
        }
        if let Some(origin) = self.origin_url {
            config.cors.origin = origin;
        }
        if let Some(dir) = self.utg_install_dir {
            config.terminal.install_dir = dir;
        }
        if let Some(level) = self.log_level {
            config.observability.log_level = level;
        }
        if let Some(addr) = self.metrics_address {
            config.observability.metrics_enabled = true;
            config.observability.metrics_address = addr;
        }
    }
}
