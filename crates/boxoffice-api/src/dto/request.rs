//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Body of `POST /api/bookings`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateBookingRequest {
    /// Seat to reserve.
    #[validate(range(min = 1, message = "seat_id must be positive"))]
    pub seat_id: i32,
}

/// Body of `POST /api/seats`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateSeatRequest {
    /// Row label.
    #[validate(length(min = 1, max = 8, message = "row_number must be 1-8 characters"))]
    pub row_number: String,
    /// Position within the row.
    #[validate(range(min = 1, message = "seat_number must be at least 1"))]
    pub seat_number: i32,
    /// Price in minor currency units.
    #[validate(range(min = 0, message = "price must not be negative"))]
    pub price: i32,
}
