//! Reservation coordinator configuration.

use serde::{Deserialize, Serialize};

/// Settings for the two-tier reservation protocol.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReservationConfig {
    /// Deadline for the authoritative store commit in milliseconds.
    #[serde(default = "default_commit_timeout")]
    pub commit_timeout_ms: u64,
}

impl Default for ReservationConfig {
    fn default() -> Self {
        Self {
            commit_timeout_ms: default_commit_timeout(),
        }
    }
}

fn default_commit_timeout() -> u64 {
    5_000
}
