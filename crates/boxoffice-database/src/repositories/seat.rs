//! Seat repository implementation.

use sqlx::PgPool;

use boxoffice_core::error::{AppError, ErrorKind};
use boxoffice_core::result::AppResult;
use boxoffice_entity::seat::{CreateSeat, Seat};

/// Repository for seat inventory queries.
#[derive(Debug, Clone)]
pub struct SeatRepository {
    pool: PgPool,
}

impl SeatRepository {
    /// Create a new seat repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List every seat ordered by row then position.
    pub async fn find_all(&self) -> AppResult<Vec<Seat>> {
        sqlx::query_as::<_, Seat>("SELECT * FROM seats ORDER BY row_number, seat_number")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list seats", e))
    }

    /// Find a seat by primary key.
    pub async fn find_by_id(&self, id: i32) -> AppResult<Option<Seat>> {
        sqlx::query_as::<_, Seat>("SELECT * FROM seats WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find seat", e))
    }

    /// Insert a new available seat.
    ///
    /// A duplicate `(row_number, seat_number)` pair is reported as a conflict.
    pub async fn create(&self, data: &CreateSeat) -> AppResult<Seat> {
        sqlx::query_as::<_, Seat>(
            "INSERT INTO seats (row_number, seat_number, status, price) \
             VALUES ($1, $2, 'available', $3) RETURNING *",
        )
        .bind(&data.row_number)
        .bind(data.seat_number)
        .bind(data.price)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => AppError::conflict(format!(
                "Seat {}{} already exists",
                data.row_number, data.seat_number
            )),
            _ => AppError::with_source(ErrorKind::Database, "Failed to create seat", e),
        })
    }
}
