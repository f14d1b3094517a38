//! Seat status enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Authoritative booking status of a seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "seat_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum SeatStatus {
    /// The seat can be booked.
    Available,
    /// The seat has been committed to a user.
    Booked,
}

impl SeatStatus {
    /// Whether a booking may be committed against this status.
    pub fn is_available(&self) -> bool {
        matches!(self, Self::Available)
    }

    /// Return the status as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Booked => "booked",
        }
    }
}

impl fmt::Display for SeatStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SeatStatus {
    type Err = boxoffice_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "available" => Ok(Self::Available),
            "booked" => Ok(Self::Booked),
            _ => Err(boxoffice_core::AppError::validation(format!(
                "Invalid seat status: '{s}'. Expected one of: available, booked"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(
            "AVAILABLE".parse::<SeatStatus>().unwrap(),
            SeatStatus::Available
        );
        assert_eq!("booked".parse::<SeatStatus>().unwrap(), SeatStatus::Booked);
        assert!("reserved".parse::<SeatStatus>().is_err());
    }

    #[test]
    fn test_only_available_is_bookable() {
        assert!(SeatStatus::Available.is_available());
        assert!(!SeatStatus::Booked.is_available());
    }
}
