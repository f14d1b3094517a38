//! Booking repository: the transactional commit path.

use sqlx::{PgPool, Postgres, Transaction};
use tracing::debug;

use boxoffice_core::error::{AppError, ErrorKind};
use boxoffice_core::result::AppResult;
use boxoffice_entity::booking::Booking;
use boxoffice_entity::seat::SeatStatus;

use crate::store::CommitOutcome;

/// Repository for booking rows.
#[derive(Debug, Clone)]
pub struct BookingRepository {
    pool: PgPool,
}

impl BookingRepository {
    /// Create a new booking repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Lock the seat row, re-check availability, flip the status and insert
    /// the booking, all in one transaction.
    ///
    /// Returning early (or dropping the future) drops the transaction, which
    /// rolls back every statement issued so far.
    pub async fn commit_reservation(&self, seat_id: i32, user_id: i32) -> AppResult<CommitOutcome> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let status: Option<SeatStatus> =
            sqlx::query_scalar("SELECT status FROM seats WHERE id = $1 FOR UPDATE")
                .bind(seat_id)
                .fetch_optional(&mut *tx)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to lock seat row", e)
                })?;

        let Some(status) = status else {
            debug!(seat_id, "Seat row not found");
            return Ok(CommitOutcome::NotFound);
        };

        if !status.is_available() {
            debug!(seat_id, status = %status, "Seat no longer available");
            return Ok(CommitOutcome::Conflict {
                reason: format!("seat is already {status}"),
            });
        }

        let booking = Self::apply(&mut tx, seat_id, user_id).await?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit reservation", e)
        })?;

        Ok(CommitOutcome::Committed(booking))
    }

    async fn apply(
        tx: &mut Transaction<'_, Postgres>,
        seat_id: i32,
        user_id: i32,
    ) -> AppResult<Booking> {
        sqlx::query("UPDATE seats SET status = 'booked' WHERE id = $1")
            .bind(seat_id)
            .execute(&mut **tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to update seat status", e)
            })?;

        sqlx::query_as::<_, Booking>(
            "INSERT INTO bookings (seat_id, user_id) VALUES ($1, $2) RETURNING *",
        )
        .bind(seat_id)
        .bind(user_id)
        .fetch_one(&mut **tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to insert booking", e))
    }

    /// All bookings owned by a user, newest first.
    pub async fn find_by_user(&self, user_id: i32) -> AppResult<Vec<Booking>> {
        sqlx::query_as::<_, Booking>(
            "SELECT * FROM bookings WHERE user_id = $1 ORDER BY created_at DESC, id DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list bookings", e))
    }
}
