//! Seat listing command.

use serde::Serialize;
use tabled::Tabled;

use boxoffice_core::error::AppError;
use boxoffice_database::connection::DatabasePool;
use boxoffice_database::store::{PgResourceStore, ResourceStore};
use boxoffice_entity::seat::Seat;

use crate::output::{self, OutputFormat};

#[derive(Debug, Serialize, Tabled)]
struct SeatRow {
    #[tabled(rename = "ID")]
    id: i32,
    #[tabled(rename = "Row")]
    row: String,
    #[tabled(rename = "Seat")]
    seat: i32,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Price")]
    price: i32,
}

impl From<Seat> for SeatRow {
    fn from(s: Seat) -> Self {
        Self {
            id: s.id,
            status: s.status.to_string(),
            row: s.row_number,
            seat: s.seat_number,
            price: s.price,
        }
    }
}

/// Print every seat ordered by row and number.
pub async fn execute(db: &DatabasePool, format: OutputFormat) -> Result<(), AppError> {
    let store = PgResourceStore::new(db);
    let rows: Vec<SeatRow> = store
        .list_seats()
        .await?
        .into_iter()
        .map(SeatRow::from)
        .collect();
    output::print_list(&rows, format);
    Ok(())
}
