//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use boxoffice_entity::booking::Booking;
use boxoffice_entity::seat::Seat;
use boxoffice_realtime::HubMetricsSnapshot;

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// A committed booking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingResponse {
    pub id: i32,
    pub seat_id: i32,
    pub user_id: i32,
    pub created_at: DateTime<Utc>,
}

impl From<Booking> for BookingResponse {
    fn from(b: Booking) -> Self {
        Self {
            id: b.id,
            seat_id: b.seat_id,
            user_id: b.user_id,
            created_at: b.created_at,
        }
    }
}

/// A seat and its current status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeatResponse {
    pub id: i32,
    pub row_number: String,
    pub seat_number: i32,
    /// `available` or `booked`.
    pub status: String,
    pub price: i32,
}

impl From<Seat> for SeatResponse {
    fn from(s: Seat) -> Self {
        Self {
            id: s.id,
            status: s.status.to_string(),
            row_number: s.row_number,
            seat_number: s.seat_number,
            price: s.price,
        }
    }
}

/// Basic liveness response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `ok` when the process answers.
    pub status: String,
    /// Crate version.
    pub version: String,
    /// Seconds since the server started.
    pub uptime_seconds: u64,
}

/// Reachability of one backing service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentHealth {
    /// Backend name (`postgres`, `redis`, `memory`).
    pub backend: String,
    /// `up` or `down`.
    pub status: String,
    /// Probe error, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Health of every dependency plus hub counters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetailedHealthResponse {
    /// `ok` when all dependencies are up, otherwise `degraded`.
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub store: ComponentHealth,
    pub gate: ComponentHealth,
    pub hub: HubMetricsSnapshot,
}
