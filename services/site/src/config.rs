//! Service configuration (env-driven).
//!
//! Mail settings are not read here; the delivery pipeline resolves them per
//! request through its configuration provider.

use std::net::SocketAddr;

use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub struct Config {
    /// Address the HTTP server binds to.
    pub listen_addr: SocketAddr,

    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Deployment label reported by the env-check endpoint.
    pub environment: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let listen_addr = std::env::var("FOLIO_LISTEN_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:3000".to_string())
            .parse()
            .context("FOLIO_LISTEN_ADDR must be a socket address (host:port).")?;

        let log_level = std::env::var("FOLIO_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let environment =
            std::env::var("FOLIO_ENV").unwrap_or_else(|_| "development".to_string());

        Ok(Self {
            listen_addr,
            log_level,
            environment,
        })
    }
}
