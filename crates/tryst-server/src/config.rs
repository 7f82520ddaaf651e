//! Server configuration.
//!
//! A single knob today: the socket address to bind. Configuration comes from
//! an optional TOML file; the CLI may override individual fields after
//! loading.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Address the server binds when nothing else is configured.
pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:3000";

/// Runtime configuration for the rendezvous server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    /// Socket address to listen on, e.g. `127.0.0.1:3000`
    pub bind_address: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from a TOML file.
    ///
    /// Missing keys fall back to their defaults; unknown keys are rejected
    /// so a typo in the file fails loudly instead of silently binding the
    /// default address.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let config = toml::from_str(&raw)
            .with_context(|| format!("failed to parse config file {}", path.display()))?;
        Ok(config)
    }
}
