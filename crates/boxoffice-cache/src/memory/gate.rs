//! In-memory lock gate backed by a [`DashMap`].
//!
//! The map's entry guard holds the shard lock for the duration of the
//! check-and-insert, which makes `try_claim` atomic per key. Expired claims
//! are treated as absent; they are overwritten by the next claim on the
//! same key and swept from the whole map every [`SWEEP_EVERY`] claims.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tokio::time::Instant;
use tracing::debug;

use boxoffice_core::result::AppResult;

use crate::gate::{ClaimResult, LockGate};

/// Number of claims between two sweeps of expired entries.
pub const SWEEP_EVERY: usize = 256;

#[derive(Debug, Clone)]
struct Claim {
    token: String,
    expires_at: Instant,
}

impl Claim {
    fn is_live(&self, now: Instant) -> bool {
        self.expires_at > now
    }
}

/// Single-node lock gate.
#[derive(Debug, Clone, Default)]
pub struct MemoryLockGate {
    claims: Arc<DashMap<String, Claim>>,
    claims_since_sweep: Arc<AtomicUsize>,
}

impl MemoryLockGate {
    /// Create an empty gate.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live claims.
    pub fn live_claims(&self) -> usize {
        let now = Instant::now();
        self.claims.iter().filter(|c| c.is_live(now)).count()
    }

    /// Number of stored entries, expired ones included.
    pub fn stored_claims(&self) -> usize {
        self.claims.len()
    }

    /// Drop every expired claim. Returns how many were removed.
    pub fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let before = self.claims.len();
        self.claims.retain(|_, claim| claim.is_live(now));
        let removed = before.saturating_sub(self.claims.len());
        if removed > 0 {
            debug!(removed, "Swept expired gate claims");
        }
        removed
    }

    fn maybe_sweep(&self) {
        let count = self.claims_since_sweep.fetch_add(1, Ordering::Relaxed) + 1;
        if count % SWEEP_EVERY == 0 {
            self.purge_expired();
        }
    }
}

#[async_trait]
impl LockGate for MemoryLockGate {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn try_claim(&self, key: &str, token: &str, ttl: Duration) -> AppResult<ClaimResult> {
        // Must run before the entry guard is taken: retain locks every shard.
        self.maybe_sweep();

        let now = Instant::now();
        let claim = Claim {
            token: token.to_string(),
            expires_at: now + ttl,
        };

        match self.claims.entry(key.to_string()) {
            Entry::Occupied(mut held) => {
                if held.get().is_live(now) {
                    debug!(key, holder = %held.get().token, "Gate key already held");
                    return Ok(ClaimResult::AlreadyHeld);
                }
                held.insert(claim);
            }
            Entry::Vacant(slot) => {
                slot.insert(claim);
            }
        }
        Ok(ClaimResult::Granted)
    }

    async fn release(&self, key: &str, token: &str) -> AppResult<bool> {
        Ok(self
            .claims
            .remove_if(key, |_, claim| claim.token == token)
            .is_some())
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }
}
