//! Seat inventory and booking queries.

pub mod service;

pub use service::SeatService;
