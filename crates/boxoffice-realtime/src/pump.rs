//! Per-subscriber output pump.

use std::fmt::Display;
use std::time::Duration;

use futures::{Sink, SinkExt};
use tokio::sync::mpsc;
use tracing::debug;

use crate::hub::HubHandle;
use crate::message::OutboundMessage;
use crate::subscriber::SubscriberId;

/// Upper bound on flushing and closing a connection whose queue was closed.
pub const CLOSE_TIMEOUT: Duration = Duration::from_secs(5);

/// Drain a subscriber's queue into its connection until either side closes.
///
/// Messages are written in queue order. A write failure unregisters this
/// subscriber only; the hub closing the queue (overflow or unregister) ends
/// the pump and closes the sink, giving up after [`CLOSE_TIMEOUT`].
pub async fn run_output_pump<S>(
    id: SubscriberId,
    mut queue: mpsc::Receiver<OutboundMessage>,
    sink: S,
    hub: HubHandle,
) where
    S: Sink<OutboundMessage>,
    S::Error: Display,
{
    let mut sink = std::pin::pin!(sink);

    while let Some(message) = queue.recv().await {
        if let Err(e) = sink.send(message).await {
            debug!(subscriber_id = %id, error = %e, "Subscriber write failed");
            hub.unregister(id).await;
            return;
        }
        hub.metrics().message_written();
    }

    debug!(subscriber_id = %id, "Subscriber queue closed, closing connection");
    if tokio::time::timeout(CLOSE_TIMEOUT, sink.close()).await.is_err() {
        debug!(subscriber_id = %id, "Connection did not close in time, abandoning it");
    }
}
