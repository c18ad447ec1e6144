//! HTTP server configuration.
//!
//! Defaults can be overridden with the `SIGNALING_HOST` and `SIGNALING_PORT`
//! environment variables.
use std::env;
use thiserror::Error;

/// Address the server binds to when `SIGNALING_HOST` is unset.
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Port the server binds to when `SIGNALING_PORT` is unset.
pub const DEFAULT_PORT: u16 = 8080;

/// WebSocket endpoint for signaling sessions.
pub const WS_PATH: &str = "/ws";

/// JSON snapshot of broker counters.
pub const STATS_PATH: &str = "/stats";

pub const HOST_VAR: &str = "SIGNALING_HOST";
pub const PORT_VAR: &str = "SIGNALING_PORT";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid SIGNALING_PORT value {0:?}: expected a port number")]
    InvalidPort(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl ServerConfig {
    /// Load the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup(HOST_VAR)
            .filter(|h| !h.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = match lookup(PORT_VAR) {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort(raw))?,
            None => DEFAULT_PORT,
        };
        Ok(Self { host, port })
    }
}
