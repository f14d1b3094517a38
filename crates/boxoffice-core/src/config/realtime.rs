//! Notification hub configuration.

use serde::{Deserialize, Serialize};

/// Real-time (WebSocket) fan-out configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RealtimeConfig {
    /// Outbound queue capacity per subscriber. A subscriber whose queue
    /// is full at broadcast time is dropped.
    #[serde(default = "default_subscriber_queue")]
    pub subscriber_queue_size: usize,
    /// Capacity of each of the hub's control channels.
    #[serde(default = "default_hub_channel")]
    pub hub_channel_capacity: usize,
}

impl Default for RealtimeConfig {
    fn default() -> Self {
        Self {
            subscriber_queue_size: default_subscriber_queue(),
            hub_channel_capacity: default_hub_channel(),
        }
    }
}

fn default_subscriber_queue() -> usize {
    256
}

fn default_hub_channel() -> usize {
    1024
}
