//! Route definitions for the Box Office HTTP API.
//!
//! REST routes are mounted under `/api`; the WebSocket upgrade lives at
//! `/ws`.

use axum::Router;
use axum::middleware as axum_middleware;
use axum::routing::get;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the router with all routes and the request-logging middleware.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(booking_routes())
        .merge(seat_routes())
        .merge(health_routes());

    Router::new()
        .nest("/api", api_routes)
        .route("/ws", get(handlers::ws::ws_upgrade))
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .with_state(state)
}

/// Reservation endpoints
fn booking_routes() -> Router<AppState> {
    Router::new()
        .route("/bookings", axum::routing::post(handlers::bookings::create_booking))
        .route("/bookings/me", get(handlers::bookings::my_bookings))
}

/// Seat inventory endpoints
fn seat_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/seats",
            get(handlers::seats::list_seats).post(handlers::seats::create_seat),
        )
        .route("/seats/{id}", get(handlers::seats::get_seat))
}

/// Liveness and dependency health
fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health::health))
        .route("/health/detailed", get(handlers::health::health_detailed))
}
