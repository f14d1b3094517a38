//! WebSocket upgrade handler.
//!
//! Each socket becomes one hub subscriber. Outbound frames are written by
//! the subscriber's output pump; this task watches the inbound side for the
//! close and drops the socket as soon as the pump stops.

use axum::extract::State;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::response::Response;
use futures::{SinkExt, Stream, StreamExt, future};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use boxoffice_realtime::{HubHandle, OutboundMessage, SubscriberId, run_output_pump};

use crate::state::AppState;

/// GET /ws
pub async fn ws_upgrade(State(state): State<AppState>, ws: WebSocketUpgrade) -> Response {
    let hub = state.hub.clone();
    ws.on_upgrade(move |socket| handle_socket(hub, socket))
}

async fn handle_socket(hub: HubHandle, socket: WebSocket) {
    let (id, queue) = match hub.register().await {
        Ok(registration) => registration,
        Err(e) => {
            warn!(error = %e, "Rejecting WebSocket subscriber");
            return;
        }
    };
    info!(subscriber_id = %id, "WebSocket subscriber connected");

    let (sink, inbound) = socket.split();
    let sink = sink.with(|message: OutboundMessage| {
        future::ready(Ok::<_, axum::Error>(Message::Text(message.as_str().into())))
    });
    let mut pump = tokio::spawn(run_output_pump(id, queue, sink, hub.clone()));

    let pump_finished = watch_connection(id, inbound, &mut pump).await;

    hub.unregister(id).await;
    if !pump_finished {
        let _ = pump.await;
    }
    info!(subscriber_id = %id, "WebSocket subscriber disconnected");
}

/// Wait until the peer leaves or the output pump stops. A finished pump
/// means the hub dropped this subscriber, so the inbound side is not
/// waited on any further. Returns `true` when the pump finished first.
async fn watch_connection<S>(
    id: SubscriberId,
    mut inbound: S,
    pump: &mut JoinHandle<()>,
) -> bool
where
    S: Stream<Item = Result<Message, axum::Error>> + Unpin,
{
    loop {
        tokio::select! {
            _ = &mut *pump => {
                debug!(subscriber_id = %id, "Output pump stopped, dropping connection");
                return true;
            }
            frame = inbound.next() => match frame {
                Some(Ok(Message::Close(_))) | None => return false,
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    warn!(subscriber_id = %id, error = %e, "WebSocket read error");
                    return false;
                }
            },
        }
    }
}
