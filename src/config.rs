//! Application configuration.
//!
//! The configuration is loaded from a JSON file, by default
//! `$XDG_CONFIG_HOME/wmt/config.json`, or the path given with `--config`.
//!
//! # Example
//!
//! ```json
//! {
//!   "socket": {
//!     "fallback_roots": ["/tmp"],
//!     "max_response_bytes": 1048576
//!   },
//!   "transport_errors": "degrade"
//! }
//! ```

use crate::hyprland::session::TransportErrorPolicy;
use crate::hyprland::socket::DEFAULT_MAX_RESPONSE_BYTES;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level configuration.
///
/// Every field is optional; a minimal `{}` file is valid and all sections
/// fall back to their compiled-in defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Where to find the command socket and how much to read from it.
    #[serde(default)]
    pub socket: SocketConfig,

    /// Whether failed socket requests degrade the listing or fail it.
    #[serde(default)]
    pub transport_errors: TransportErrorPolicy,
}

/// Socket discovery and reply limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SocketConfig {
    /// Directories tried, in order, after `$XDG_RUNTIME_DIR` when looking
    /// for `hypr/<instance>/.socket.sock`.  Older Hyprland releases kept
    /// their sockets under `/tmp`.
    pub fallback_roots: Vec<PathBuf>,
    /// Largest reply accepted from the socket, in bytes.
    pub max_response_bytes: usize,
}

impl Default for SocketConfig {
    fn default() -> Self {
        Self {
            fallback_roots: vec![PathBuf::from("/tmp")],
            max_response_bytes: DEFAULT_MAX_RESPONSE_BYTES,
        }
    }
}

impl Config {
    /// Load configuration from a JSON file at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError(format!("failed to read {}: {}", path.display(), e)))?;
        let config: Self = serde_json::from_str(&contents)
            .map_err(|e| ConfigError(format!("failed to parse {}: {}", path.display(), e)))?;
        Ok(config)
    }
}

/// Error from loading or parsing a configuration file.
#[derive(Debug, thiserror::Error)]
#[error("config error: {0}")]
pub struct ConfigError(String);
