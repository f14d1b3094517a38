//! Lock gate configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the advisory lock gate in front of the resource store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GateConfig {
    /// Gate backend: `"redis"` or `"memory"`.
    #[serde(default = "default_provider")]
    pub provider: String,
    /// Lifetime of a claim in seconds. Crash-recovery bound only; must
    /// exceed the worst-case store transaction.
    #[serde(default = "default_claim_ttl")]
    pub claim_ttl_seconds: u64,
    /// Redis-specific settings.
    #[serde(default)]
    pub redis: RedisGateConfig,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            claim_ttl_seconds: default_claim_ttl(),
            redis: RedisGateConfig::default(),
        }
    }
}

/// Redis gate backend configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedisGateConfig {
    /// Redis connection URL.
    #[serde(default = "default_redis_url")]
    pub url: String,
    /// Prefix prepended to every gate key.
    #[serde(default)]
    pub key_prefix: String,
    /// Per-command response timeout in milliseconds.
    #[serde(default = "default_response_timeout")]
    pub response_timeout_ms: u64,
}

impl Default for RedisGateConfig {
    fn default() -> Self {
        Self {
            url: default_redis_url(),
            key_prefix: String::new(),
            response_timeout_ms: default_response_timeout(),
        }
    }
}

fn default_provider() -> String {
    "redis".to_string()
}

fn default_claim_ttl() -> u64 {
    60
}

fn default_redis_url() -> String {
    "redis://localhost:6379".to_string()
}

fn default_response_timeout() -> u64 {
    500
}
