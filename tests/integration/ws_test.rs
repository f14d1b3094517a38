//! Integration tests for WebSocket fan-out of booking events.

mod helpers;

use std::net::SocketAddr;
use std::time::Duration;

use futures::{Stream, StreamExt};
use serde_json::Value;
use tokio::net::TcpListener;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;

async fn serve(app: &helpers::TestApp) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind");
    let addr = listener.local_addr().expect("local addr");
    let router = app.router.clone();
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("server");
    });
    addr
}

async fn wait_for_subscribers(app: &helpers::TestApp, n: u64) {
    tokio::time::timeout(Duration::from_secs(5), async {
        while app.hub.metrics().active_subscribers() < n {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .expect("subscribers never registered");
}

async fn next_text<S>(socket: &mut S) -> Value
where
    S: Stream<Item = Result<Message, tokio_tungstenite::tungstenite::Error>> + Unpin,
{
    let frame = tokio::time::timeout(Duration::from_secs(5), socket.next())
        .await
        .expect("no frame before timeout")
        .expect("socket closed")
        .expect("socket error");
    serde_json::from_str(frame.to_text().expect("text frame")).expect("json frame")
}

#[tokio::test]
async fn test_booking_is_broadcast_to_every_subscriber() {
    let app = helpers::TestApp::with_seats(7).await;
    let addr = serve(&app).await;

    let (mut first, _) = connect_async(format!("ws://{addr}/ws"))
        .await
        .expect("connect");
    let (mut second, _) = connect_async(format!("ws://{addr}/ws"))
        .await
        .expect("connect");
    wait_for_subscribers(&app, 2).await;

    let response = app.book(7, 11).await;
    assert_eq!(response.status, axum::http::StatusCode::CREATED);

    for socket in [&mut first, &mut second] {
        let event = next_text(socket).await;
        assert_eq!(event["type"], "seat_booked");
        assert_eq!(event["seat_id"], 7);
        assert_eq!(event["user_id"], 11);
    }
}

#[tokio::test]
async fn test_refused_attempts_are_not_broadcast() {
    let app = helpers::TestApp::with_seats(2).await;
    let addr = serve(&app).await;

    let (mut socket, _) = connect_async(format!("ws://{addr}/ws"))
        .await
        .expect("connect");
    wait_for_subscribers(&app, 1).await;

    app.book(1, 1).await;
    app.book(1, 2).await;
    app.book(99, 3).await;
    app.book(2, 4).await;

    let first = next_text(&mut socket).await;
    assert_eq!(first["seat_id"], 1);
    assert_eq!(first["user_id"], 1);
    let second = next_text(&mut socket).await;
    assert_eq!(second["seat_id"], 2);
    assert_eq!(second["user_id"], 4);
    assert_eq!(app.hub.metrics().snapshot().broadcasts_total, 2);
}

#[tokio::test]
async fn test_closed_socket_is_unregistered() {
    let app = helpers::TestApp::new().await;
    let addr = serve(&app).await;

    let (mut socket, _) = connect_async(format!("ws://{addr}/ws"))
        .await
        .expect("connect");
    wait_for_subscribers(&app, 1).await;

    socket.close(None).await.expect("close");

    tokio::time::timeout(Duration::from_secs(5), async {
        while app.hub.metrics().active_subscribers() > 0 {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .expect("subscriber was not removed");
}
