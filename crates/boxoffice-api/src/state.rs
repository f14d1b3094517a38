//! Application state shared across all handlers and middleware.

use std::sync::Arc;
use std::time::Instant;

use boxoffice_cache::gate::LockGate;
use boxoffice_core::config::AppConfig;
use boxoffice_database::store::ResourceStore;
use boxoffice_realtime::HubHandle;
use boxoffice_service::reservation::ReservationCoordinator;
use boxoffice_service::seat::SeatService;

use crate::auth::JwtVerifier;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are cheap to clone.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,

    // ── Backends ─────────────────────────────────────────────
    /// Authoritative seat/booking store
    pub store: Arc<dyn ResourceStore>,
    /// Advisory lock gate
    pub gate: Arc<dyn LockGate>,
    /// Notification hub handle
    pub hub: HubHandle,

    // ── Auth ─────────────────────────────────────────────────
    /// Bearer token verifier
    pub jwt: Arc<JwtVerifier>,

    // ── Services ─────────────────────────────────────────────
    /// Reservation coordinator
    pub coordinator: Arc<ReservationCoordinator>,
    /// Seat inventory service
    pub seat_service: Arc<SeatService>,

    /// Process start, for uptime reporting
    pub started_at: Instant,
}

impl AppState {
    /// Wire services over the given backends. The hub doubles as the
    /// coordinator's event publisher.
    pub fn new(
        config: AppConfig,
        store: Arc<dyn ResourceStore>,
        gate: Arc<dyn LockGate>,
        hub: HubHandle,
    ) -> Self {
        let coordinator = ReservationCoordinator::from_config(
            Arc::clone(&gate),
            Arc::clone(&store),
            Arc::new(hub.clone()),
            &config.gate,
            &config.reservation,
        );
        let seat_service = SeatService::new(Arc::clone(&store));
        let jwt = JwtVerifier::new(&config.auth);

        Self {
            config: Arc::new(config),
            store,
            gate,
            hub,
            jwt: Arc::new(jwt),
            coordinator: Arc::new(coordinator),
            seat_service: Arc::new(seat_service),
            started_at: Instant::now(),
        }
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}
