//! Gate manager that dispatches to the configured provider.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::info;

use boxoffice_core::config::GateConfig;
use boxoffice_core::error::AppError;
use boxoffice_core::result::AppResult;

use crate::gate::{ClaimResult, LockGate};

/// Lock gate selected at startup from configuration.
#[derive(Debug, Clone)]
pub struct GateManager {
    inner: Arc<dyn LockGate>,
}

impl GateManager {
    /// Build the gate named by `config.provider`.
    pub async fn new(config: &GateConfig) -> AppResult<Self> {
        let inner: Arc<dyn LockGate> = match config.provider.as_str() {
            #[cfg(feature = "redis-backend")]
            "redis" => {
                info!("Initializing Redis lock gate");
                let client = crate::redis::RedisClient::connect(&config.redis).await?;
                Arc::new(crate::redis::RedisLockGate::new(client))
            }
            #[cfg(feature = "memory")]
            "memory" => {
                info!("Initializing in-memory lock gate");
                Arc::new(crate::memory::MemoryLockGate::new())
            }
            other => {
                return Err(AppError::configuration(format!(
                    "Unknown gate provider: '{other}'. Supported: memory, redis"
                )));
            }
        };

        Ok(Self { inner })
    }

    /// Wrap an existing gate (for testing).
    pub fn from_gate(gate: Arc<dyn LockGate>) -> Self {
        Self { inner: gate }
    }
}

#[async_trait]
impl LockGate for GateManager {
    fn name(&self) -> &'static str {
        self.inner.name()
    }

    async fn try_claim(&self, key: &str, token: &str, ttl: Duration) -> AppResult<ClaimResult> {
        self.inner.try_claim(key, token, ttl).await
    }

    async fn release(&self, key: &str, token: &str) -> AppResult<bool> {
        self.inner.release(key, token).await
    }

    async fn health_check(&self) -> AppResult<bool> {
        self.inner.health_check().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_provider_selected() {
        let config = GateConfig {
            provider: "memory".into(),
            ..GateConfig::default()
        };
        let gate = GateManager::new(&config).await.unwrap();
        assert_eq!(gate.name(), "memory");
    }

    #[tokio::test]
    async fn test_unknown_provider_rejected() {
        let config = GateConfig {
            provider: "zookeeper".into(),
            ..GateConfig::default()
        };
        let err = GateManager::new(&config).await.unwrap_err();
        assert_eq!(err.kind, boxoffice_core::error::ErrorKind::Configuration);
    }
}
