//! # boxoffice-service
//!
//! Business logic service layer for Box Office. The
//! [`ReservationCoordinator`] drives the two-tier reservation protocol;
//! [`SeatService`] covers inventory and booking queries.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time via `Arc` references.

pub mod context;
pub mod reservation;
pub mod seat;

pub use context::RequestContext;
pub use reservation::{ReservationCoordinator, ReservationOutcome, ReservationState};
pub use seat::SeatService;
