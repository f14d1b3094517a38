//! Redis lock gate using Lua scripts for atomicity.
//!
//! Suitable for multi-node deployments: every node consults the same Redis
//! instance, and each claim is a single server-side script execution.

use std::time::Duration;

use async_trait::async_trait;
use redis::Script;
use tracing::{debug, error, warn};

use boxoffice_core::error::AppError;
use boxoffice_core::result::AppResult;

use super::client::RedisClient;
use crate::gate::{ClaimResult, LockGate};

/// Atomic claim.
///
/// KEYS[1] = gate key
/// ARGV[1] = holder token
/// ARGV[2] = ttl in seconds
///
/// Returns 1 when granted, 0 when a claim already exists.
const CLAIM_SCRIPT: &str = r#"
    if redis.call('EXISTS', KEYS[1]) == 1 then
        return 0
    end
    redis.call('SET', KEYS[1], ARGV[1], 'EX', ARGV[2])
    return 1
"#;

/// Compare-and-delete release.
///
/// KEYS[1] = gate key
/// ARGV[1] = holder token
///
/// Returns the number of keys removed.
const RELEASE_SCRIPT: &str = r#"
    if redis.call('GET', KEYS[1]) == ARGV[1] then
        return redis.call('DEL', KEYS[1])
    end
    return 0
"#;

/// Lock gate stored in Redis.
#[derive(Debug, Clone)]
pub struct RedisLockGate {
    client: RedisClient,
}

impl RedisLockGate {
    /// Wrap a connected client.
    pub fn new(client: RedisClient) -> Self {
        Self { client }
    }
}

/// Redis `EX` takes whole seconds and rejects zero.
fn ttl_seconds(ttl: Duration) -> u64 {
    ttl.as_secs().max(1)
}

#[async_trait]
impl LockGate for RedisLockGate {
    fn name(&self) -> &'static str {
        "redis"
    }

    async fn try_claim(&self, key: &str, token: &str, ttl: Duration) -> AppResult<ClaimResult> {
        let full_key = self.client.prefixed_key(key);
        let mut conn = self.client.conn_mut();
        let script = Script::new(CLAIM_SCRIPT);
        let mut invocation = script.key(&full_key);
        invocation.arg(token).arg(ttl_seconds(ttl));

        let result: i64 = self
            .client
            .run("claim", invocation.invoke_async(&mut conn))
            .await?;

        match result {
            1 => Ok(ClaimResult::Granted),
            0 => {
                debug!(key = %full_key, "Gate key already held");
                Ok(ClaimResult::AlreadyHeld)
            }
            other => {
                error!(result = other, "Unexpected claim script result");
                Err(AppError::cache(format!("Unexpected claim result: {other}")))
            }
        }
    }

    async fn release(&self, key: &str, token: &str) -> AppResult<bool> {
        let full_key = self.client.prefixed_key(key);
        let mut conn = self.client.conn_mut();
        let script = Script::new(RELEASE_SCRIPT);
        let mut invocation = script.key(&full_key);
        invocation.arg(token);

        let removed: i64 = self
            .client
            .run("release", invocation.invoke_async(&mut conn))
            .await?;

        if removed == 0 {
            warn!(key = %full_key, "Gate release: key not held by this token");
        }
        Ok(removed > 0)
    }

    async fn health_check(&self) -> AppResult<bool> {
        let mut conn = self.client.conn_mut();
        let pong: String = self
            .client
            .run("PING", redis::cmd("PING").query_async(&mut conn))
            .await?;
        Ok(pong == "PONG")
    }
}
