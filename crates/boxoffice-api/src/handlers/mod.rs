//! Route handlers.

pub mod bookings;
pub mod health;
pub mod seats;
pub mod ws;
