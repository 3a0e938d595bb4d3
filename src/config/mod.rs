//! Configuration management

use crate::protocol::{DEFAULT_CLIENT_MAX_FRAME_SIZE, DEFAULT_MAX_FRAME_SIZE};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::PathBuf;

/// Default relay port; the `PORT` environment variable overrides it
pub const DEFAULT_PORT: u16 = 5001;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub limits: LimitsConfig,
}

/// Listener settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address of the framed relay socket
    pub listen: SocketAddr,

    /// Address of the read-only HTTP status surface
    pub http_listen: SocketAddr,

    /// Serve `GET /` and `GET /users`
    pub http_enabled: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(DEFAULT_PORT);

        Self {
            listen: SocketAddr::from(([127, 0, 0, 1], port)),
            http_listen: SocketAddr::from(([127, 0, 0, 1], port.saturating_add(1))),
            http_enabled: true,
        }
    }
}

/// Queue and frame limits
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Largest frame payload the relay accepts from a client, in bytes
    pub max_frame_size: u32,

    /// Largest frame payload a client accepts from the relay, in bytes
    pub client_max_frame_size: u32,

    /// Events buffered per connection before deliveries are dropped
    pub outbound_queue_capacity: usize,

    /// Events buffered between connection readers and the dispatcher
    pub inbound_queue_capacity: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_frame_size: DEFAULT_MAX_FRAME_SIZE,
            client_max_frame_size: DEFAULT_CLIENT_MAX_FRAME_SIZE,
            outbound_queue_capacity: 256,
            inbound_queue_capacity: 1024,
        }
    }
}

impl std::str::FromStr for Config {
    type Err = anyhow::Error;

    fn from_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }
}

impl Config {
    /// Load config from file, or return defaults if not found
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load config from an explicit path, or return defaults if it does not exist
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            content.parse()
        } else {
            Ok(Config::default())
        }
    }

    /// Get the config file path
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("parley")
            .join("config.toml")
    }
}
