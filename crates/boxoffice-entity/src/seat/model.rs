//! Seat database model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::status::SeatStatus;

/// A bookable seat. Its `status` is only ever changed inside a store
/// transaction holding the row lock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Seat {
    /// Seat ID.
    pub id: i32,
    /// Row label (e.g. `"A"`).
    pub row_number: String,
    /// Position within the row.
    pub seat_number: i32,
    /// Current authoritative status.
    pub status: SeatStatus,
    /// Price in minor currency units.
    pub price: i32,
}

impl Seat {
    /// Whether the seat can still be booked.
    pub fn is_available(&self) -> bool {
        self.status.is_available()
    }
}

/// Data required to create a new seat.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSeat {
    /// Row label.
    pub row_number: String,
    /// Position within the row.
    pub seat_number: i32,
    /// Price in minor currency units.
    pub price: i32,
}
