//! Hub counters.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

/// Counters shared between the hub task, the pumps and observers.
///
/// Reading these never touches the subscriber set.
#[derive(Debug, Default)]
pub struct HubMetrics {
    subscribers_active: AtomicU64,
    subscribers_total: AtomicU64,
    broadcasts_total: AtomicU64,
    messages_queued: AtomicU64,
    messages_written: AtomicU64,
    dropped_overflow: AtomicU64,
    dropped_closed: AtomicU64,
    unregistered: AtomicU64,
    ingress_deferred: AtomicU64,
}

impl HubMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn subscriber_added(&self) {
        self.subscribers_total.fetch_add(1, Ordering::Relaxed);
        self.subscribers_active.fetch_add(1, Ordering::Relaxed);
    }

    fn subscriber_removed(&self, counter: &AtomicU64) {
        counter.fetch_add(1, Ordering::Relaxed);
        self.subscribers_active.fetch_sub(1, Ordering::Relaxed);
    }

    pub(crate) fn subscriber_overflowed(&self) {
        self.subscriber_removed(&self.dropped_overflow);
    }

    pub(crate) fn subscriber_closed(&self) {
        self.subscriber_removed(&self.dropped_closed);
    }

    pub(crate) fn subscriber_unregistered(&self) {
        self.subscriber_removed(&self.unregistered);
    }

    pub(crate) fn broadcast(&self, queued: u64) {
        self.broadcasts_total.fetch_add(1, Ordering::Relaxed);
        self.messages_queued.fetch_add(queued, Ordering::Relaxed);
    }

    pub(crate) fn message_written(&self) {
        self.messages_written.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn ingress_deferred(&self) {
        self.ingress_deferred.fetch_add(1, Ordering::Relaxed);
    }

    /// Subscribers currently in the live set.
    pub fn active_subscribers(&self) -> u64 {
        self.subscribers_active.load(Ordering::Relaxed)
    }

    pub fn snapshot(&self) -> HubMetricsSnapshot {
        HubMetricsSnapshot {
            subscribers_active: self.subscribers_active.load(Ordering::Relaxed),
            subscribers_total: self.subscribers_total.load(Ordering::Relaxed),
            broadcasts_total: self.broadcasts_total.load(Ordering::Relaxed),
            messages_queued: self.messages_queued.load(Ordering::Relaxed),
            messages_written: self.messages_written.load(Ordering::Relaxed),
            dropped_overflow: self.dropped_overflow.load(Ordering::Relaxed),
            dropped_closed: self.dropped_closed.load(Ordering::Relaxed),
            unregistered: self.unregistered.load(Ordering::Relaxed),
            ingress_deferred: self.ingress_deferred.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time copy of [`HubMetrics`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HubMetricsSnapshot {
    /// Subscribers currently registered.
    pub subscribers_active: u64,
    /// Subscribers ever registered.
    pub subscribers_total: u64,
    /// Broadcasts processed by the hub.
    pub broadcasts_total: u64,
    /// Messages placed on subscriber queues.
    pub messages_queued: u64,
    /// Messages written to connections by output pumps.
    pub messages_written: u64,
    /// Subscribers dropped because their queue was full.
    pub dropped_overflow: u64,
    /// Subscribers dropped because their queue was already closed.
    pub dropped_closed: u64,
    /// Subscribers removed by explicit unregister.
    pub unregistered: u64,
    /// Broadcasts handed to a detached task because ingress was full.
    pub ingress_deferred: u64,
}
