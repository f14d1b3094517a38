//! Gate key builders.

/// Gate key guarding a single seat.
pub fn seat_lock(seat_id: i32) -> String {
    format!("seat_lock:{seat_id}")
}
