//! # boxoffice-api
//!
//! HTTP API layer for Box Office built on Axum.
//!
//! Provides the booking and seat endpoints, the WebSocket upgrade that
//! registers subscribers with the notification hub, bearer token
//! verification, middleware (logging, CORS, timeouts), DTOs, and error
//! mapping.

pub mod app;
pub mod auth;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::build_app;
pub use error::ApiError;
pub use state::AppState;
