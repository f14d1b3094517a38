//! Two-tier seat reservation.

pub mod coordinator;
pub mod state;

pub use coordinator::ReservationCoordinator;
pub use state::{ReservationOutcome, ReservationState};
