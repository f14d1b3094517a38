//! Seat seeding command.

use clap::Args;

use boxoffice_core::error::{AppError, ErrorKind};
use boxoffice_database::connection::DatabasePool;
use boxoffice_database::store::{PgResourceStore, ResourceStore};
use boxoffice_entity::seat::CreateSeat;

use crate::output;

/// Arguments for the seed command
#[derive(Debug, Args)]
pub struct SeedArgs {
    /// Row labels: a range such as `A..J` or a list such as `A,B,C`
    #[arg(long, default_value = "A..J")]
    pub rows: String,
    /// Seats per row
    #[arg(long, default_value_t = 10)]
    pub per_row: i32,
    /// Price per seat in minor currency units
    #[arg(long, default_value_t = 1000)]
    pub price: i32,
}

/// Create `per_row` seats in each row; existing seats are skipped.
pub async fn execute(args: &SeedArgs, db: &DatabasePool) -> Result<(), AppError> {
    if args.per_row < 1 {
        return Err(AppError::validation("--per-row must be at least 1"));
    }
    if args.price < 0 {
        return Err(AppError::validation("--price must not be negative"));
    }

    let rows = parse_rows(&args.rows)?;
    let store = PgResourceStore::new(db);
    let mut created = 0;
    let mut skipped = 0;

    for row in &rows {
        for seat_number in 1..=args.per_row {
            let result = store
                .create_seat(CreateSeat {
                    row_number: row.clone(),
                    seat_number,
                    price: args.price,
                })
                .await;
            match result {
                Ok(_) => created += 1,
                Err(e) if e.kind == ErrorKind::Conflict => skipped += 1,
                Err(e) => return Err(e),
            }
        }
    }

    output::print_success(&format!(
        "Seeded {created} seats across {} rows",
        rows.len()
    ));
    if skipped > 0 {
        output::print_warning(&format!("{skipped} seats already existed and were skipped"));
    }
    Ok(())
}

/// Expand `A..J` into single-letter labels, or split a comma list.
fn parse_rows(input: &str) -> Result<Vec<String>, AppError> {
    if let Some((start, end)) = input.split_once("..") {
        let (start, end) = (single_letter(start)?, single_letter(end)?);
        if start > end {
            return Err(AppError::validation(format!(
                "Row range '{input}' is reversed"
            )));
        }
        return Ok((start..=end).map(String::from).collect());
    }

    let rows: Vec<String> = input
        .split(',')
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .map(str::to_uppercase)
        .collect();
    if rows.is_empty() {
        return Err(AppError::validation("No rows given"));
    }
    Ok(rows)
}

fn single_letter(s: &str) -> Result<char, AppError> {
    let mut chars = s.trim().chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_alphabetic() => Ok(c.to_ascii_uppercase()),
        _ => Err(AppError::validation(format!(
            "Row range bounds must be single letters, got '{s}'"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letter_range() {
        assert_eq!(parse_rows("A..D").unwrap(), vec!["A", "B", "C", "D"]);
        assert_eq!(parse_rows("a..b").unwrap(), vec!["A", "B"]);
    }

    #[test]
    fn test_list() {
        assert_eq!(parse_rows("A, c,VIP").unwrap(), vec!["A", "C", "VIP"]);
    }

    #[test]
    fn test_bad_ranges() {
        assert!(parse_rows("J..A").is_err());
        assert!(parse_rows("AA..B").is_err());
        assert!(parse_rows(" , ").is_err());
    }
}
