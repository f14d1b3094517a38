//! The notification hub actor.
//!
//! The live subscriber set is a plain `HashMap` owned by one task. Other
//! tasks reach it only through three bounded channels (register, unregister
//! and broadcast), so no lock ever guards it.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::mpsc::error::TrySendError;
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use boxoffice_core::config::RealtimeConfig;
use boxoffice_core::error::AppError;
use boxoffice_core::events::ReservationEvent;
use boxoffice_core::traits::EventPublisher;

use crate::message::OutboundMessage;
use crate::metrics::HubMetrics;
use crate::subscriber::{DeliveryFailure, Subscriber, SubscriberId};

/// Owner of the subscriber set. Runs as a single spawned task.
#[derive(Debug)]
pub struct NotificationHub {
    subscribers: HashMap<SubscriberId, Subscriber>,
    register_rx: mpsc::Receiver<Subscriber>,
    unregister_rx: mpsc::Receiver<SubscriberId>,
    broadcast_rx: mpsc::Receiver<OutboundMessage>,
    shutdown_rx: broadcast::Receiver<()>,
    metrics: Arc<HubMetrics>,
}

impl NotificationHub {
    /// Spawn the hub task and return a handle for talking to it.
    pub fn spawn(config: &RealtimeConfig) -> (HubHandle, JoinHandle<()>) {
        let capacity = config.hub_channel_capacity.max(1);
        let (register_tx, register_rx) = mpsc::channel(capacity);
        let (unregister_tx, unregister_rx) = mpsc::channel(capacity);
        let (broadcast_tx, broadcast_rx) = mpsc::channel(capacity);
        let (shutdown_tx, shutdown_rx) = broadcast::channel(1);
        let metrics = Arc::new(HubMetrics::new());

        let hub = Self {
            subscribers: HashMap::new(),
            register_rx,
            unregister_rx,
            broadcast_rx,
            shutdown_rx,
            metrics: Arc::clone(&metrics),
        };
        let task = tokio::spawn(hub.run());

        info!(
            subscriber_queue_size = config.subscriber_queue_size,
            hub_channel_capacity = capacity,
            "Notification hub started"
        );

        let handle = HubHandle {
            register_tx,
            unregister_tx,
            broadcast_tx,
            shutdown_tx,
            metrics,
            queue_size: config.subscriber_queue_size,
        };
        (handle, task)
    }

    async fn run(mut self) {
        loop {
            // Registrations are drained first so a broadcast sent after
            // `register` returned always reaches the new subscriber.
            tokio::select! {
                biased;
                _ = self.shutdown_rx.recv() => break,
                Some(subscriber) = self.register_rx.recv() => self.add(subscriber),
                Some(id) = self.unregister_rx.recv() => self.remove(id),
                message = self.broadcast_rx.recv() => match message {
                    Some(message) => self.fan_out(message),
                    None => break,
                },
            }
        }

        let remaining = self.subscribers.len();
        self.subscribers.clear();
        info!(closed_subscribers = remaining, "Notification hub stopped");
    }

    fn add(&mut self, subscriber: Subscriber) {
        debug!(subscriber_id = %subscriber.id, "Subscriber registered");
        self.metrics.subscriber_added();
        self.subscribers.insert(subscriber.id, subscriber);
    }

    fn remove(&mut self, id: SubscriberId) {
        // Dropping the subscriber drops its sender and closes the queue.
        if self.subscribers.remove(&id).is_some() {
            debug!(subscriber_id = %id, "Subscriber unregistered");
            self.metrics.subscriber_unregistered();
        }
    }

    fn fan_out(&mut self, message: OutboundMessage) {
        let metrics = &self.metrics;
        let mut queued = 0;
        self.subscribers
            .retain(|id, subscriber| match subscriber.try_deliver(message.clone()) {
                Ok(()) => {
                    queued += 1;
                    true
                }
                Err(DeliveryFailure::Full) => {
                    warn!(subscriber_id = %id, "Subscriber queue full, dropping subscriber");
                    metrics.subscriber_overflowed();
                    false
                }
                Err(DeliveryFailure::Closed) => {
                    debug!(subscriber_id = %id, "Subscriber queue closed, removing");
                    metrics.subscriber_closed();
                    false
                }
            });
        metrics.broadcast(queued);
    }
}

/// Cloneable handle to a running [`NotificationHub`].
#[derive(Debug, Clone)]
pub struct HubHandle {
    register_tx: mpsc::Sender<Subscriber>,
    unregister_tx: mpsc::Sender<SubscriberId>,
    broadcast_tx: mpsc::Sender<OutboundMessage>,
    shutdown_tx: broadcast::Sender<()>,
    metrics: Arc<HubMetrics>,
    queue_size: usize,
}

impl HubHandle {
    /// Add a new subscriber to the live set.
    ///
    /// Returns its id and the receiving end of its bounded queue.
    pub async fn register(
        &self,
    ) -> Result<(SubscriberId, mpsc::Receiver<OutboundMessage>), AppError> {
        let (subscriber, queue) = Subscriber::new(self.queue_size);
        let id = subscriber.id;
        self.register_tx
            .send(subscriber)
            .await
            .map_err(|_| AppError::service_unavailable("Notification hub is not running"))?;
        Ok((id, queue))
    }

    /// Remove a subscriber and close its queue. Unknown ids are ignored.
    pub async fn unregister(&self, id: SubscriberId) {
        if self.unregister_tx.send(id).await.is_err() {
            debug!(subscriber_id = %id, "Hub already stopped; nothing to unregister");
        }
    }

    /// Hand a message to the hub without waiting.
    ///
    /// When the ingress channel is momentarily full the send continues on a
    /// detached task; the caller never blocks.
    pub fn broadcast(&self, message: OutboundMessage) {
        match self.broadcast_tx.try_send(message) {
            Ok(()) => {}
            Err(TrySendError::Full(message)) => {
                self.metrics.ingress_deferred();
                let tx = self.broadcast_tx.clone();
                tokio::spawn(async move {
                    if tx.send(message).await.is_err() {
                        warn!("Notification hub stopped, broadcast dropped");
                    }
                });
            }
            Err(TrySendError::Closed(_)) => {
                warn!("Notification hub stopped, broadcast dropped");
            }
        }
    }

    /// Ask the hub task to exit, closing every subscriber queue.
    pub fn shutdown(&self) {
        let _ = self.shutdown_tx.send(());
    }

    pub fn metrics(&self) -> &Arc<HubMetrics> {
        &self.metrics
    }
}

impl EventPublisher for HubHandle {
    fn publish(&self, event: ReservationEvent) {
        match OutboundMessage::from_event(&event) {
            Ok(message) => self.broadcast(message),
            Err(e) => error!(
                event_type = event.event_type(),
                seat_id = event.seat_id(),
                error = %e,
                "Failed to serialize reservation event"
            ),
        }
    }
}
