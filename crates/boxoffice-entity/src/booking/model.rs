//! Booking (reservation) database model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A committed reservation of one seat by one user.
///
/// Created exactly once per successful commit and never mutated or
/// deleted afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Booking {
    /// Booking ID.
    pub id: i32,
    /// The booked seat.
    pub seat_id: i32,
    /// The owner of the booking.
    pub user_id: i32,
    /// When the booking was committed.
    pub created_at: DateTime<Utc>,
}
