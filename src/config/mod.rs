//! Configuration module for the saloon backend.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::net::{AddrParseError, SocketAddr};
use std::path::PathBuf;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to the JSON snapshot holding every saloon record
    pub snapshot_path: PathBuf,
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Fails only when `SALOON_BIND_ADDR` is set to something that is not a socket address.
    pub fn from_env() -> Result<Self, AddrParseError> {
        dotenvy::dotenv().ok();

        let snapshot_path = env::var("SALOON_SNAPSHOT_PATH")
            .unwrap_or_else(|_| "./data/saloons.json".to_string())
            .into();

        let bind_addr = env::var("SALOON_BIND_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:5011".to_string())
            .parse()?;

        let log_level = env::var("SALOON_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            snapshot_path,
            bind_addr,
            log_level,
        })
    }
}
