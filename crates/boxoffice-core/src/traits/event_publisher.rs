//! Fire-and-forget hand-off of reservation events.

use crate::events::ReservationEvent;

/// Sink for reservation outcome events.
///
/// Implementations must return without waiting for delivery to any
/// subscriber and must not report delivery failures back to the caller:
/// a slow or stopped notification path never fails or delays a booking.
pub trait EventPublisher: Send + Sync + std::fmt::Debug + 'static {
    /// Enqueue an event for broadcast.
    fn publish(&self, event: ReservationEvent);
}
