//! Session lifecycle configuration.

use serde::{Deserialize, Serialize};

/// Session lifecycle configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Name of the cookie carrying the session identifier.
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
    /// Session lifetime in seconds since creation. `0` means sessions
    /// never expire.
    #[serde(default)]
    pub duration_seconds: u64,
    /// Path of the JSON snapshot file used for crash recovery of durable
    /// session records.
    #[serde(default = "default_snapshot_path")]
    pub snapshot_path: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: default_cookie_name(),
            duration_seconds: 0,
            snapshot_path: default_snapshot_path(),
        }
    }
}

fn default_cookie_name() -> String {
    "_doorman_session".to_string()
}

fn default_snapshot_path() -> String {
    "data/sessions.json".to_string()
}
