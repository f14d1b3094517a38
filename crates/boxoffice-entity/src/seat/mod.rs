//! Seat entity and status enum.

pub mod model;
pub mod status;

pub use model::{CreateSeat, Seat};
pub use status::SeatStatus;
