//! SQL repositories for the seat and booking tables.

pub mod booking;
pub mod seat;

pub use booking::BookingRepository;
pub use seat::SeatRepository;
