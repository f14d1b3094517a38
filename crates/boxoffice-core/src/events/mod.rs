//! Domain events emitted by the reservation engine.
//!
//! Events are handed to an [`EventPublisher`](crate::traits::EventPublisher)
//! after an authoritative commit and fanned out to live subscribers.

use serde::{Deserialize, Serialize};

/// An immutable description of a reservation state change.
///
/// Serialized with an internal `type` tag, e.g.
/// `{"type":"seat_booked","seat_id":7,"user_id":42}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ReservationEvent {
    /// A seat was committed to a user.
    SeatBooked {
        /// The booked seat.
        seat_id: i32,
        /// The new owner.
        user_id: i32,
    },
}

impl ReservationEvent {
    /// The seat this event refers to.
    pub fn seat_id(&self) -> i32 {
        match self {
            Self::SeatBooked { seat_id, .. } => *seat_id,
        }
    }

    /// The wire name of the event type.
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::SeatBooked { .. } => "seat_booked",
        }
    }

    /// Serialize the event into the payload sent to subscribers.
    pub fn to_payload(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
