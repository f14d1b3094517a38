//! Booking handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use crate::dto::request::CreateBookingRequest;
use crate::dto::response::{ApiResponse, BookingResponse};
use crate::error::ApiError;
use crate::extractors::{AuthUser, ValidatedJson};
use crate::state::AppState;

/// POST /api/bookings
pub async fn create_booking(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<CreateBookingRequest>,
) -> Result<(StatusCode, Json<ApiResponse<BookingResponse>>), ApiError> {
    let outcome = state.coordinator.reserve(&auth, req.seat_id).await?;
    let booking = outcome.into_booking(req.seat_id)?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(BookingResponse::from(booking))),
    ))
}

/// GET /api/bookings/me
pub async fn my_bookings(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<Vec<BookingResponse>>>, ApiError> {
    let bookings = state.seat_service.my_bookings(&auth).await?;
    Ok(Json(ApiResponse::ok(
        bookings.into_iter().map(BookingResponse::from).collect(),
    )))
}
