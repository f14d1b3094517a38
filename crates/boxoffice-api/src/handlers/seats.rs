//! Seat inventory handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use boxoffice_entity::seat::CreateSeat;

use crate::dto::request::CreateSeatRequest;
use crate::dto::response::{ApiResponse, SeatResponse};
use crate::error::ApiError;
use crate::extractors::{AuthUser, ValidatedJson};
use crate::state::AppState;

/// GET /api/seats
pub async fn list_seats(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<SeatResponse>>>, ApiError> {
    let seats = state.seat_service.list_seats().await?;
    Ok(Json(ApiResponse::ok(
        seats.into_iter().map(SeatResponse::from).collect(),
    )))
}

/// GET /api/seats/{id}
pub async fn get_seat(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<SeatResponse>>, ApiError> {
    let seat = state.seat_service.get_seat(id).await?;
    Ok(Json(ApiResponse::ok(seat.into())))
}

/// POST /api/seats
pub async fn create_seat(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<CreateSeatRequest>,
) -> Result<(StatusCode, Json<ApiResponse<SeatResponse>>), ApiError> {
    let seat = state
        .seat_service
        .create_seat(
            &auth,
            CreateSeat {
                row_number: req.row_number,
                seat_number: req.seat_number,
                price: req.price,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(seat.into()))))
}
