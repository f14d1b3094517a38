//! PostgreSQL-backed resource store.

use async_trait::async_trait;
use sqlx::PgPool;

use boxoffice_core::result::AppResult;
use boxoffice_entity::booking::Booking;
use boxoffice_entity::seat::{CreateSeat, Seat};

use super::{CommitOutcome, ResourceStore};
use crate::connection::{ping, DatabasePool};
use crate::repositories::{BookingRepository, SeatRepository};

/// Resource store using `SELECT ... FOR UPDATE` row locks.
#[derive(Debug, Clone)]
pub struct PgResourceStore {
    pool: PgPool,
    seats: SeatRepository,
    bookings: BookingRepository,
}

impl PgResourceStore {
    /// Build a store over an open pool.
    pub fn new(db: &DatabasePool) -> Self {
        let pool = db.pool().clone();
        Self {
            seats: SeatRepository::new(pool.clone()),
            bookings: BookingRepository::new(pool.clone()),
            pool,
        }
    }
}

#[async_trait]
impl ResourceStore for PgResourceStore {
    fn name(&self) -> &'static str {
        "postgres"
    }

    async fn commit_reservation(&self, seat_id: i32, user_id: i32) -> AppResult<CommitOutcome> {
        self.bookings.commit_reservation(seat_id, user_id).await
    }

    async fn list_seats(&self) -> AppResult<Vec<Seat>> {
        self.seats.find_all().await
    }

    async fn find_seat(&self, seat_id: i32) -> AppResult<Option<Seat>> {
        self.seats.find_by_id(seat_id).await
    }

    async fn create_seat(&self, data: CreateSeat) -> AppResult<Seat> {
        self.seats.create(&data).await
    }

    async fn bookings_for_user(&self, user_id: i32) -> AppResult<Vec<Booking>> {
        self.bookings.find_by_user(user_id).await
    }

    async fn health_check(&self) -> AppResult<bool> {
        ping(&self.pool).await
    }
}
