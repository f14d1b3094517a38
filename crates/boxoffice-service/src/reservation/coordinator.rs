//! Reservation coordinator: lock gate, then store commit, then notify.
//!
//! The gate filters contention cheaply; the store's row lock is what
//! actually guarantees a seat is booked at most once. A gate claim is never
//! trusted on its own, so a crashed holder or an expired claim can at worst
//! let two requesters reach the store, where one of them gets a conflict.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use boxoffice_cache::gate::{ClaimResult, LockGate};
use boxoffice_cache::keys;
use boxoffice_core::config::{GateConfig, ReservationConfig};
use boxoffice_core::error::AppError;
use boxoffice_core::events::ReservationEvent;
use boxoffice_core::result::AppResult;
use boxoffice_core::traits::EventPublisher;
use boxoffice_database::store::{CommitOutcome, ResourceStore};

use super::state::{ReservationOutcome, ReservationState};
use crate::context::RequestContext;

/// Orchestrates a single reservation attempt per call.
#[derive(Debug, Clone)]
pub struct ReservationCoordinator {
    gate: Arc<dyn LockGate>,
    store: Arc<dyn ResourceStore>,
    publisher: Arc<dyn EventPublisher>,
    /// Lifetime of a gate claim.
    claim_ttl: Duration,
    /// Deadline for the store commit.
    commit_timeout: Duration,
}

impl ReservationCoordinator {
    /// Creates a coordinator with explicit timings.
    pub fn new(
        gate: Arc<dyn LockGate>,
        store: Arc<dyn ResourceStore>,
        publisher: Arc<dyn EventPublisher>,
        claim_ttl: Duration,
        commit_timeout: Duration,
    ) -> Self {
        Self {
            gate,
            store,
            publisher,
            claim_ttl,
            commit_timeout,
        }
    }

    /// Creates a coordinator with timings taken from configuration.
    pub fn from_config(
        gate: Arc<dyn LockGate>,
        store: Arc<dyn ResourceStore>,
        publisher: Arc<dyn EventPublisher>,
        gate_config: &GateConfig,
        reservation_config: &ReservationConfig,
    ) -> Self {
        Self::new(
            gate,
            store,
            publisher,
            Duration::from_secs(gate_config.claim_ttl_seconds),
            Duration::from_millis(reservation_config.commit_timeout_ms),
        )
    }

    /// Attempt to book `seat_id` for the requester in `ctx`.
    ///
    /// Returns a terminal [`ReservationOutcome`], or a retryable error when
    /// the gate or the store is unavailable or the commit deadline passes.
    /// No retries are attempted here.
    pub async fn reserve(
        &self,
        ctx: &RequestContext,
        seat_id: i32,
    ) -> AppResult<ReservationOutcome> {
        let user_id = ctx.user_id;
        let key = keys::seat_lock(seat_id);
        let token = ctx.gate_token();
        let mut state = ReservationState::Requested;

        advance(&mut state, ReservationState::GateChecking, seat_id, user_id);
        let claim = match self.gate.try_claim(&key, &token, self.claim_ttl).await {
            Ok(claim) => claim,
            Err(e) => {
                advance(&mut state, ReservationState::StoreError, seat_id, user_id);
                warn!(seat_id, user_id, error = %e, "Lock gate unavailable, refusing reservation");
                return Err(e);
            }
        };

        if claim == ClaimResult::AlreadyHeld {
            advance(&mut state, ReservationState::GateRejected, seat_id, user_id);
            return Ok(ReservationOutcome::Contended);
        }
        advance(&mut state, ReservationState::GateGranted, seat_id, user_id);

        advance(&mut state, ReservationState::StoreCommitting, seat_id, user_id);
        let committed = tokio::time::timeout(
            self.commit_timeout,
            self.store.commit_reservation(seat_id, user_id),
        )
        .await;

        match committed {
            Ok(Ok(CommitOutcome::Committed(booking))) => {
                advance(&mut state, ReservationState::Committed, seat_id, user_id);
                self.publisher
                    .publish(ReservationEvent::SeatBooked { seat_id, user_id });
                info!(
                    seat_id,
                    user_id,
                    booking_id = booking.id,
                    request_id = %ctx.request_id,
                    "Seat booked"
                );
                Ok(ReservationOutcome::Created(booking))
            }
            Ok(Ok(CommitOutcome::Conflict { reason })) => {
                // The claim is left to expire.
                advance(&mut state, ReservationState::StoreConflict, seat_id, user_id);
                Ok(ReservationOutcome::Conflict { reason })
            }
            Ok(Ok(CommitOutcome::NotFound)) => {
                advance(&mut state, ReservationState::StoreConflict, seat_id, user_id);
                Ok(ReservationOutcome::NotFound)
            }
            Ok(Err(e)) => {
                advance(&mut state, ReservationState::StoreError, seat_id, user_id);
                warn!(seat_id, user_id, error = %e, "Reservation commit failed");
                self.release_claim(&key, &token).await;
                Err(e)
            }
            Err(_) => {
                advance(&mut state, ReservationState::StoreError, seat_id, user_id);
                warn!(
                    seat_id,
                    user_id,
                    timeout_ms = self.commit_timeout.as_millis() as u64,
                    "Reservation commit exceeded deadline, transaction rolled back"
                );
                self.release_claim(&key, &token).await;
                Err(AppError::service_unavailable(format!(
                    "Reservation of seat {seat_id} timed out, please retry"
                )))
            }
        }
    }

    /// Best-effort release after a transient failure.
    async fn release_claim(&self, key: &str, token: &str) {
        match self.gate.release(key, token).await {
            Ok(true) => debug!(key, "Gate claim released"),
            Ok(false) => debug!(key, "Gate claim already gone"),
            Err(e) => warn!(key, error = %e, "Failed to release gate claim; it will expire"),
        }
    }
}

fn advance(state: &mut ReservationState, next: ReservationState, seat_id: i32, user_id: i32) {
    debug_assert!(
        state.can_transition_to(next),
        "illegal reservation transition {state} -> {next}"
    );
    debug!(seat_id, user_id, from = %state, state = %next, "Reservation state transition");
    *state = next;
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use boxoffice_cache::memory::MemoryLockGate;
    use boxoffice_core::error::ErrorKind;
    use boxoffice_database::store::MemoryResourceStore;
    use boxoffice_entity::booking::Booking;
    use boxoffice_entity::seat::{CreateSeat, Seat, SeatStatus};

    const TTL: Duration = Duration::from_secs(60);

    #[derive(Debug, Default)]
    struct RecordingPublisher {
        events: Mutex<Vec<ReservationEvent>>,
    }

    impl RecordingPublisher {
        fn events(&self) -> Vec<ReservationEvent> {
            self.events.lock().unwrap().clone()
        }
    }

    impl EventPublisher for RecordingPublisher {
        fn publish(&self, event: ReservationEvent) {
            self.events.lock().unwrap().push(event);
        }
    }

    /// Counts commit calls before delegating.
    #[derive(Debug)]
    struct CountingStore {
        inner: MemoryResourceStore,
        commits: AtomicUsize,
    }

    #[async_trait]
    impl ResourceStore for CountingStore {
        fn name(&self) -> &'static str {
            "counting"
        }
        async fn commit_reservation(&self, seat_id: i32, user_id: i32) -> AppResult<CommitOutcome> {
            self.commits.fetch_add(1, Ordering::SeqCst);
            self.inner.commit_reservation(seat_id, user_id).await
        }
        async fn list_seats(&self) -> AppResult<Vec<Seat>> {
            self.inner.list_seats().await
        }
        async fn find_seat(&self, seat_id: i32) -> AppResult<Option<Seat>> {
            self.inner.find_seat(seat_id).await
        }
        async fn create_seat(&self, data: CreateSeat) -> AppResult<Seat> {
            self.inner.create_seat(data).await
        }
        async fn bookings_for_user(&self, user_id: i32) -> AppResult<Vec<Booking>> {
            self.inner.bookings_for_user(user_id).await
        }
        async fn health_check(&self) -> AppResult<bool> {
            Ok(true)
        }
    }

    #[derive(Debug)]
    struct UnreachableGate;

    #[async_trait]
    impl LockGate for UnreachableGate {
        fn name(&self) -> &'static str {
            "unreachable"
        }
        async fn try_claim(&self, _: &str, _: &str, _: Duration) -> AppResult<ClaimResult> {
            Err(AppError::cache("connection refused"))
        }
        async fn release(&self, _: &str, _: &str) -> AppResult<bool> {
            Err(AppError::cache("connection refused"))
        }
        async fn health_check(&self) -> AppResult<bool> {
            Ok(false)
        }
    }

    fn seat(id: i32) -> Seat {
        Seat {
            id,
            row_number: "A".into(),
            seat_number: id,
            status: SeatStatus::Available,
            price: 2500,
        }
    }

    struct Harness {
        gate: Arc<MemoryLockGate>,
        store: Arc<CountingStore>,
        publisher: Arc<RecordingPublisher>,
        coordinator: ReservationCoordinator,
    }

    fn harness(store: MemoryResourceStore, commit_timeout: Duration) -> Harness {
        let gate = Arc::new(MemoryLockGate::new());
        let store = Arc::new(CountingStore {
            inner: store,
            commits: AtomicUsize::new(0),
        });
        let publisher = Arc::new(RecordingPublisher::default());
        let coordinator = ReservationCoordinator::new(
            gate.clone(),
            store.clone(),
            publisher.clone(),
            TTL,
            commit_timeout,
        );
        Harness {
            gate,
            store,
            publisher,
            coordinator,
        }
    }

    #[tokio::test]
    async fn test_concurrent_requests_single_winner() {
        let h = harness(
            MemoryResourceStore::restore(vec![seat(7)], vec![]),
            Duration::from_secs(5),
        );
        let coordinator = Arc::new(h.coordinator.clone());

        let handles: Vec<_> = (1..=25)
            .map(|user| {
                let coordinator = Arc::clone(&coordinator);
                tokio::spawn(async move {
                    coordinator.reserve(&RequestContext::new(user), 7).await
                })
            })
            .collect();

        let mut created = 0;
        for handle in handles {
            match handle.await.unwrap().unwrap() {
                ReservationOutcome::Created(_) => created += 1,
                ReservationOutcome::Contended | ReservationOutcome::Conflict { .. } => {}
                ReservationOutcome::NotFound => panic!("seat 7 exists"),
            }
        }
        assert_eq!(created, 1);
        assert_eq!(h.publisher.events().len(), 1);
        assert_eq!(h.store.inner.booking_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_distinct_seats_are_independent() {
        let latency = Duration::from_millis(200);
        let h = harness(
            MemoryResourceStore::restore(vec![seat(1), seat(2)], vec![])
                .with_commit_latency(latency),
            Duration::from_secs(5),
        );

        let ctx_a = RequestContext::new(10);
        let ctx_b = RequestContext::new(20);
        let started = tokio::time::Instant::now();
        let (a, b) = tokio::join!(
            h.coordinator.reserve(&ctx_a, 1),
            h.coordinator.reserve(&ctx_b, 2),
        );
        let elapsed = started.elapsed();

        assert!(matches!(a.unwrap(), ReservationOutcome::Created(b) if b.user_id == 10));
        assert!(matches!(b.unwrap(), ReservationOutcome::Created(b) if b.user_id == 20));
        // Both commits overlapped instead of queueing behind each other.
        assert!(elapsed >= latency);
        assert!(elapsed < latency * 2, "took {elapsed:?}");
        assert_eq!(
            h.publisher.events(),
            vec![
                ReservationEvent::SeatBooked { seat_id: 1, user_id: 10 },
                ReservationEvent::SeatBooked { seat_id: 2, user_id: 20 },
            ]
        );
    }

    #[tokio::test]
    async fn test_held_claim_is_contended_without_store_call() {
        let h = harness(
            MemoryResourceStore::restore(vec![seat(7)], vec![]),
            Duration::from_secs(5),
        );
        h.gate
            .try_claim(&keys::seat_lock(7), "99", TTL)
            .await
            .unwrap();

        let outcome = h.coordinator.reserve(&RequestContext::new(1), 7).await.unwrap();
        assert_eq!(outcome, ReservationOutcome::Contended);
        assert_eq!(h.store.commits.load(Ordering::SeqCst), 0);
        assert!(h.publisher.events().is_empty());
    }

    #[tokio::test]
    async fn test_conflict_leaves_claim_to_expire() {
        let mut booked = seat(3);
        booked.status = SeatStatus::Booked;
        let h = harness(
            MemoryResourceStore::restore(vec![booked], vec![]),
            Duration::from_secs(5),
        );

        let outcome = h.coordinator.reserve(&RequestContext::new(1), 3).await.unwrap();
        assert_eq!(
            outcome,
            ReservationOutcome::Conflict {
                reason: "seat is already booked".into()
            }
        );
        assert_eq!(
            h.gate.try_claim(&keys::seat_lock(3), "2", TTL).await.unwrap(),
            ClaimResult::AlreadyHeld
        );
        assert!(h.publisher.events().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_seat() {
        let h = harness(MemoryResourceStore::new(), Duration::from_secs(5));
        let outcome = h.coordinator.reserve(&RequestContext::new(1), 404).await.unwrap();
        assert_eq!(outcome, ReservationOutcome::NotFound);
    }

    #[tokio::test]
    async fn test_deadline_rolls_back_and_releases_claim() {
        let h = harness(
            MemoryResourceStore::restore(vec![seat(5)], vec![])
                .with_commit_latency(Duration::from_millis(300)),
            Duration::from_millis(20),
        );

        let err = h
            .coordinator
            .reserve(&RequestContext::new(1), 5)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::ServiceUnavailable);
        assert!(err.is_retryable());

        let stored = h.store.find_seat(5).await.unwrap().unwrap();
        assert!(stored.is_available());
        assert_eq!(h.store.inner.booking_count(), 0);
        assert!(h.publisher.events().is_empty());
        assert!(
            h.gate
                .try_claim(&keys::seat_lock(5), "2", TTL)
                .await
                .unwrap()
                .is_granted()
        );
    }

    #[tokio::test]
    async fn test_store_error_is_retryable_and_releases_claim() {
        let stale = Booking {
            id: 1,
            seat_id: 8,
            user_id: 77,
            created_at: chrono::Utc::now(),
        };
        let h = harness(
            MemoryResourceStore::restore(vec![seat(8)], vec![stale]),
            Duration::from_secs(5),
        );

        let err = h
            .coordinator
            .reserve(&RequestContext::new(1), 8)
            .await
            .unwrap_err();
        assert!(err.is_retryable());
        assert!(h.store.find_seat(8).await.unwrap().unwrap().is_available());
        assert!(
            h.gate
                .try_claim(&keys::seat_lock(8), "1", TTL)
                .await
                .unwrap()
                .is_granted()
        );
    }

    #[tokio::test]
    async fn test_unreachable_gate_fails_closed() {
        let store = Arc::new(CountingStore {
            inner: MemoryResourceStore::restore(vec![seat(7)], vec![]),
            commits: AtomicUsize::new(0),
        });
        let publisher = Arc::new(RecordingPublisher::default());
        let coordinator = ReservationCoordinator::new(
            Arc::new(UnreachableGate),
            store.clone(),
            publisher.clone(),
            TTL,
            Duration::from_secs(5),
        );

        let err = coordinator
            .reserve(&RequestContext::new(1), 7)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Cache);
        assert!(err.is_retryable());
        assert_eq!(store.commits.load(Ordering::SeqCst), 0);
        assert!(publisher.events().is_empty());
    }
}
