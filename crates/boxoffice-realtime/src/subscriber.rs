//! A live subscriber as seen by the hub.

use chrono::{DateTime, Utc};
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use uuid::Uuid;

use crate::message::OutboundMessage;

/// Unique subscriber identifier.
pub type SubscriberId = Uuid;

/// Why a delivery attempt failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryFailure {
    /// The subscriber's queue is at capacity.
    Full,
    /// The receiving side has gone away.
    Closed,
}

/// The hub's end of a subscriber: its id plus the sending half of its
/// bounded queue. Dropping it closes the queue.
#[derive(Debug)]
pub struct Subscriber {
    pub id: SubscriberId,
    queue: mpsc::Sender<OutboundMessage>,
    pub connected_at: DateTime<Utc>,
}

impl Subscriber {
    /// Create a subscriber with a queue of `capacity` messages.
    ///
    /// Returns the subscriber and the receiving end for its output pump.
    pub fn new(capacity: usize) -> (Self, mpsc::Receiver<OutboundMessage>) {
        let (queue, rx) = mpsc::channel(capacity.max(1));
        (
            Self {
                id: Uuid::new_v4(),
                queue,
                connected_at: Utc::now(),
            },
            rx,
        )
    }

    /// Enqueue without waiting.
    pub fn try_deliver(&self, message: OutboundMessage) -> Result<(), DeliveryFailure> {
        self.queue.try_send(message).map_err(|e| match e {
            TrySendError::Full(_) => DeliveryFailure::Full,
            TrySendError::Closed(_) => DeliveryFailure::Closed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_and_closed_are_distinguished() {
        let (sub, rx) = Subscriber::new(1);
        assert_eq!(sub.try_deliver(OutboundMessage::new("a")), Ok(()));
        assert_eq!(
            sub.try_deliver(OutboundMessage::new("b")),
            Err(DeliveryFailure::Full)
        );
        drop(rx);
        assert_eq!(
            sub.try_deliver(OutboundMessage::new("c")),
            Err(DeliveryFailure::Closed)
        );
    }
}
