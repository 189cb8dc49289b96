//! Server configuration management.
//!
//! Consolidates all environment variable reads and provides validated
//! configuration.

use std::net::SocketAddr;
use std::path::PathBuf;
use thiserror::Error;

/// Complete server configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Server bind address
    pub bind: SocketAddr,
    /// Directory of `.phh` hand files served by the API
    pub data_dir: PathBuf,
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid bind address {0:?}")]
    InvalidBind(String),
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// CLI arguments take precedence over `SERVER_BIND` and
    /// `HANDS_DATA_DIR`; built-in defaults apply last.
    pub fn from_env(
        bind_override: Option<SocketAddr>,
        data_dir_override: Option<PathBuf>,
    ) -> Result<Self, ConfigError> {
        let bind = match bind_override {
            Some(bind) => bind,
            None => {
                let raw = std::env::var("SERVER_BIND")
                    .unwrap_or_else(|_| "127.0.0.1:5000".to_string());
                raw.parse().map_err(|_| ConfigError::InvalidBind(raw))?
            }
        };

        let data_dir = data_dir_override
            .or_else(|| std::env::var("HANDS_DATA_DIR").ok().map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from("data/hands"));

        Ok(Self { bind, data_dir })
    }
}
