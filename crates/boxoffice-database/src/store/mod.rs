//! The authoritative resource store seam.
//!
//! [`ResourceStore`] is the single source of truth for seat ownership. The
//! reservation coordinator only ever mutates seat state through
//! [`ResourceStore::commit_reservation`], which must lock the seat row,
//! re-check availability and apply the status flip plus booking insert as
//! one all-or-nothing unit.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;

use boxoffice_core::result::AppResult;
use boxoffice_entity::booking::Booking;
use boxoffice_entity::seat::{CreateSeat, Seat};

pub use memory::MemoryResourceStore;
pub use postgres::PgResourceStore;

/// Non-error result of a commit attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitOutcome {
    /// The seat was flipped to booked and the booking row inserted.
    Committed(Booking),
    /// The seat exists but is not available.
    Conflict {
        /// Human-readable reason, e.g. `seat is already booked`.
        reason: String,
    },
    /// No seat with the requested id exists.
    NotFound,
}

/// Transactional seat and booking storage.
///
/// Transient failures (connectivity, pool exhaustion, constraint violations
/// after the row lock) are returned as errors and leave no partial writes.
#[async_trait]
pub trait ResourceStore: Send + Sync + std::fmt::Debug {
    /// Short backend name for health reporting.
    fn name(&self) -> &'static str;

    /// Atomically book `seat_id` for `user_id`.
    async fn commit_reservation(&self, seat_id: i32, user_id: i32) -> AppResult<CommitOutcome>;

    /// All seats ordered by row then seat number.
    async fn list_seats(&self) -> AppResult<Vec<Seat>>;

    /// Look up a single seat.
    async fn find_seat(&self, seat_id: i32) -> AppResult<Option<Seat>>;

    /// Add a new available seat to the inventory.
    async fn create_seat(&self, data: CreateSeat) -> AppResult<Seat>;

    /// Bookings owned by `user_id`, newest first.
    async fn bookings_for_user(&self, user_id: i32) -> AppResult<Vec<Booking>>;

    /// Probe store reachability.
    async fn health_check(&self) -> AppResult<bool>;
}
