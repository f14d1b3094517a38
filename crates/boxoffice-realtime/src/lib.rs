//! # boxoffice-realtime
//!
//! Fan-out of reservation events to live subscribers:
//!
//! - a single-owner [`NotificationHub`] task holding the subscriber set,
//!   reached only through its register / unregister / broadcast channels
//! - bounded per-subscriber queues; a subscriber that cannot keep up is
//!   dropped instead of slowing anyone else down
//! - an output pump per subscriber that drains its queue into the
//!   connection's sink
//! - lock-free [`HubMetrics`] counters readable from any task

pub mod hub;
pub mod message;
pub mod metrics;
pub mod pump;
pub mod subscriber;

pub use hub::{HubHandle, NotificationHub};
pub use message::OutboundMessage;
pub use metrics::{HubMetrics, HubMetricsSnapshot};
pub use pump::run_output_pump;
pub use subscriber::SubscriberId;
