//! Lock gate trait and shared types.

use std::time::Duration;

use async_trait::async_trait;

use boxoffice_core::result::AppResult;

/// Result of attempting to claim a gate key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClaimResult {
    /// The key was free (or expired) and now belongs to the caller.
    Granted,
    /// Someone else holds a live claim on the key.
    AlreadyHeld,
}

impl ClaimResult {
    /// Whether the claim was granted.
    pub fn is_granted(&self) -> bool {
        matches!(self, Self::Granted)
    }
}

/// Atomic, time-bounded claims keyed by resource identity.
///
/// A claim is advisory: it only filters contention and is never the basis
/// for a durable change. Implementations must make the existence check and
/// the insert indivisible. An unreachable backend is reported as an error so
/// that callers fail closed.
#[async_trait]
pub trait LockGate: Send + Sync + std::fmt::Debug {
    /// Short backend name for health reporting.
    fn name(&self) -> &'static str;

    /// Claim `key` for `token` unless a live claim exists.
    async fn try_claim(&self, key: &str, token: &str, ttl: Duration) -> AppResult<ClaimResult>;

    /// Drop the claim on `key` if, and only if, it is held by `token`.
    ///
    /// Returns whether a claim was removed.
    async fn release(&self, key: &str, token: &str) -> AppResult<bool>;

    /// Probe backend reachability.
    async fn health_check(&self) -> AppResult<bool>;
}
