//! Serialized payloads queued for subscribers.

use std::fmt;
use std::sync::Arc;

use boxoffice_core::events::ReservationEvent;

/// A pre-serialized text frame.
///
/// Serialized once per broadcast and shared between every subscriber
/// queue, so cloning is a reference-count bump.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMessage(Arc<str>);

impl OutboundMessage {
    /// Wrap an already-serialized payload.
    pub fn new(payload: impl Into<Arc<str>>) -> Self {
        Self(payload.into())
    }

    /// Serialize a reservation event.
    pub fn from_event(event: &ReservationEvent) -> Result<Self, serde_json::Error> {
        event.to_payload().map(Self::new)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OutboundMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
