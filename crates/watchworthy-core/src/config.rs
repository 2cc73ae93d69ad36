//! Configuration for the analysis client and orchestrator

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8000/analyze";

/// Settings read from `config.json`; every field is optional in the file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Analysis service endpoint receiving the form POST
    pub endpoint: String,

    /// Period of the elapsed-time tick while a request is in flight
    pub tick_interval_ms: u64,

    /// Abort the remote call after this many seconds (no limit when unset)
    pub request_timeout_secs: Option<u64>,
}

impl Config {
    pub fn new() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            tick_interval_ms: 1000,
            request_timeout_secs: None,
        }
    }

    /// Load from a JSON file. Missing or unreadable files fall back to defaults.
    pub fn load(path: &Path) -> Self {
        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(_) => return Self::new(),
        };

        match serde_json::from_str(&content) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ignoring unparsable config");
                Self::new()
            }
        }
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms.max(1))
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
