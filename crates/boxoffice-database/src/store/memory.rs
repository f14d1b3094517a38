//! In-process resource store.
//!
//! Each seat lives behind its own async mutex, which plays the part of the
//! database row lock. A commit holds that mutex for its whole duration and
//! only applies its writes once every check has passed, so an error or a
//! cancelled future leaves the seat and booking maps untouched.

use std::sync::Arc;
use std::sync::atomic::{AtomicI32, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tokio::sync::Mutex;
use tracing::debug;

use boxoffice_core::error::AppError;
use boxoffice_core::result::AppResult;
use boxoffice_entity::booking::Booking;
use boxoffice_entity::seat::{CreateSeat, Seat, SeatStatus};

use super::{CommitOutcome, ResourceStore};

/// Resource store held entirely in memory.
#[derive(Debug, Default)]
pub struct MemoryResourceStore {
    seats: DashMap<i32, Arc<Mutex<Seat>>>,
    positions: DashMap<(String, i32), i32>,
    /// Keyed by seat id; at most one booking per seat.
    bookings: DashMap<i32, Booking>,
    next_seat_id: AtomicI32,
    next_booking_id: AtomicI32,
    commit_latency: Option<Duration>,
}

impl MemoryResourceStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate a slow transaction: every commit sleeps for `latency` while
    /// holding the seat row lock.
    pub fn with_commit_latency(mut self, latency: Duration) -> Self {
        self.commit_latency = Some(latency);
        self
    }

    /// Rebuild a store from previously persisted rows. No consistency
    /// between the two sets is enforced.
    pub fn restore(seats: Vec<Seat>, bookings: Vec<Booking>) -> Self {
        let store = Self::new();
        let mut max_seat = 0;
        let mut max_booking = 0;
        for seat in seats {
            max_seat = max_seat.max(seat.id);
            store
                .positions
                .insert((seat.row_number.clone(), seat.seat_number), seat.id);
            store.seats.insert(seat.id, Arc::new(Mutex::new(seat)));
        }
        for booking in bookings {
            max_booking = max_booking.max(booking.id);
            store.bookings.insert(booking.seat_id, booking);
        }
        store.next_seat_id.store(max_seat, Ordering::SeqCst);
        store.next_booking_id.store(max_booking, Ordering::SeqCst);
        store
    }

    /// Number of booking rows.
    pub fn booking_count(&self) -> usize {
        self.bookings.len()
    }

    fn row(&self, seat_id: i32) -> Option<Arc<Mutex<Seat>>> {
        self.seats.get(&seat_id).map(|r| Arc::clone(r.value()))
    }
}

#[async_trait]
impl ResourceStore for MemoryResourceStore {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn commit_reservation(&self, seat_id: i32, user_id: i32) -> AppResult<CommitOutcome> {
        let Some(row) = self.row(seat_id) else {
            return Ok(CommitOutcome::NotFound);
        };
        let mut seat = row.lock().await;

        if let Some(latency) = self.commit_latency {
            tokio::time::sleep(latency).await;
        }

        if !seat.is_available() {
            debug!(seat_id, status = %seat.status, "Seat no longer available");
            return Ok(CommitOutcome::Conflict {
                reason: format!("seat is already {}", seat.status),
            });
        }

        // Nothing below awaits: the writes land together or not at all.
        let booking = match self.bookings.entry(seat_id) {
            Entry::Occupied(_) => {
                return Err(AppError::database(format!(
                    "duplicate booking for seat {seat_id}"
                )));
            }
            Entry::Vacant(slot) => {
                let booking = Booking {
                    id: self.next_booking_id.fetch_add(1, Ordering::SeqCst) + 1,
                    seat_id,
                    user_id,
                    created_at: Utc::now(),
                };
                slot.insert(booking.clone());
                booking
            }
        };
        seat.status = SeatStatus::Booked;

        Ok(CommitOutcome::Committed(booking))
    }

    async fn list_seats(&self) -> AppResult<Vec<Seat>> {
        let rows: Vec<_> = self.seats.iter().map(|r| Arc::clone(r.value())).collect();
        let mut seats = Vec::with_capacity(rows.len());
        for row in rows {
            seats.push(row.lock().await.clone());
        }
        seats.sort_by(|a, b| {
            a.row_number
                .cmp(&b.row_number)
                .then(a.seat_number.cmp(&b.seat_number))
        });
        Ok(seats)
    }

    async fn find_seat(&self, seat_id: i32) -> AppResult<Option<Seat>> {
        match self.row(seat_id) {
            Some(row) => Ok(Some(row.lock().await.clone())),
            None => Ok(None),
        }
    }

    async fn create_seat(&self, data: CreateSeat) -> AppResult<Seat> {
        match self
            .positions
            .entry((data.row_number.clone(), data.seat_number))
        {
            Entry::Occupied(_) => Err(AppError::conflict(format!(
                "Seat {}{} already exists",
                data.row_number, data.seat_number
            ))),
            Entry::Vacant(slot) => {
                let id = self.next_seat_id.fetch_add(1, Ordering::SeqCst) + 1;
                let seat = Seat {
                    id,
                    row_number: data.row_number,
                    seat_number: data.seat_number,
                    status: SeatStatus::Available,
                    price: data.price,
                };
                self.seats.insert(id, Arc::new(Mutex::new(seat.clone())));
                slot.insert(id);
                Ok(seat)
            }
        }
    }

    async fn bookings_for_user(&self, user_id: i32) -> AppResult<Vec<Booking>> {
        let mut bookings: Vec<Booking> = self
            .bookings
            .iter()
            .filter(|b| b.user_id == user_id)
            .map(|b| b.value().clone())
            .collect();
        bookings.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(bookings)
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }
}
