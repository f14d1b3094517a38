//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section.

pub mod app;
pub mod auth;
pub mod database;
pub mod gate;
pub mod logging;
pub mod realtime;
pub mod reservation;

use serde::{Deserialize, Serialize};

pub use self::app::ServerConfig;
pub use self::auth::AuthConfig;
pub use self::database::DatabaseConfig;
pub use self::gate::{GateConfig, RedisGateConfig};
pub use self::logging::LoggingConfig;
pub use self::realtime::RealtimeConfig;
pub use self::reservation::ReservationConfig;

use crate::error::AppError;

/// Root application configuration.
///
/// This struct is the top-level deserialization target for the merged
/// TOML configuration files (default.toml + environment overlay).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database connection settings.
    pub database: DatabaseConfig,
    /// Lock gate settings.
    #[serde(default)]
    pub gate: GateConfig,
    /// Reservation coordinator settings.
    #[serde(default)]
    pub reservation: ReservationConfig,
    /// Notification hub settings.
    #[serde(default)]
    pub realtime: RealtimeConfig,
    /// Bearer token verification settings.
    pub auth: AuthConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from TOML files.
    ///
    /// Merges the default configuration with an environment-specific overlay
    /// and environment variables prefixed with `BOXOFFICE__`.
    pub fn load(env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("BOXOFFICE")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        let config: Self = config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))?;

        config.validate()?;
        Ok(config)
    }

    /// Check cross-section constraints that serde defaults cannot express.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.auth.jwt_secret.trim().is_empty() {
            return Err(AppError::configuration("auth.jwt_secret must not be empty"));
        }

        let ttl_ms = self.gate.claim_ttl_seconds.saturating_mul(1000);
        if ttl_ms <= self.reservation.commit_timeout_ms {
            return Err(AppError::configuration(format!(
                "gate.claim_ttl_seconds ({}s) must exceed reservation.commit_timeout_ms ({}ms)",
                self.gate.claim_ttl_seconds, self.reservation.commit_timeout_ms
            )));
        }

        if self.realtime.subscriber_queue_size == 0 {
            return Err(AppError::configuration(
                "realtime.subscriber_queue_size must be at least 1",
            ));
        }

        Ok(())
    }
}
