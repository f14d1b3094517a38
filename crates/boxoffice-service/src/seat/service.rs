//! Seat listing, creation and per-user booking lookup.

use std::sync::Arc;

use tracing::info;

use boxoffice_core::error::AppError;
use boxoffice_database::store::ResourceStore;
use boxoffice_entity::booking::Booking;
use boxoffice_entity::seat::{CreateSeat, Seat};

use crate::context::RequestContext;

/// Read and inventory operations that do not go through the lock gate.
#[derive(Debug, Clone)]
pub struct SeatService {
    store: Arc<dyn ResourceStore>,
}

impl SeatService {
    /// Creates a new seat service.
    pub fn new(store: Arc<dyn ResourceStore>) -> Self {
        Self { store }
    }

    /// Lists all seats ordered by row and seat number.
    pub async fn list_seats(&self) -> Result<Vec<Seat>, AppError> {
        self.store.list_seats().await
    }

    /// Gets a single seat.
    pub async fn get_seat(&self, seat_id: i32) -> Result<Seat, AppError> {
        self.store
            .find_seat(seat_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Seat {seat_id} not found")))
    }

    /// Adds a seat to the inventory.
    pub async fn create_seat(
        &self,
        ctx: &RequestContext,
        data: CreateSeat,
    ) -> Result<Seat, AppError> {
        let row = data.row_number.trim();
        if row.is_empty() {
            return Err(AppError::validation("row_number must not be empty"));
        }
        if data.seat_number < 1 {
            return Err(AppError::validation("seat_number must be at least 1"));
        }
        if data.price < 0 {
            return Err(AppError::validation("price must not be negative"));
        }

        let seat = self
            .store
            .create_seat(CreateSeat {
                row_number: row.to_string(),
                ..data
            })
            .await?;

        info!(
            seat_id = seat.id,
            row = %seat.row_number,
            seat_number = seat.seat_number,
            created_by = ctx.user_id,
            "Seat created"
        );
        Ok(seat)
    }

    /// Lists the requester's bookings, newest first.
    pub async fn my_bookings(&self, ctx: &RequestContext) -> Result<Vec<Booking>, AppError> {
        self.store.bookings_for_user(ctx.user_id).await
    }
}
