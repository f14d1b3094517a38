//! Reservation attempt states and outcomes.

use std::fmt;

use boxoffice_core::error::AppError;
use boxoffice_entity::booking::Booking;

/// Lifecycle of a single reservation attempt.
///
/// ```text
/// Requested -> GateChecking -> GateRejected
///                           -> GateGranted -> StoreCommitting -> Committed
///                                                             -> StoreConflict
///                                                             -> StoreError
/// ```
///
/// A gate failure moves `GateChecking` straight to `StoreError`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReservationState {
    Requested,
    GateChecking,
    GateRejected,
    GateGranted,
    StoreCommitting,
    Committed,
    StoreConflict,
    StoreError,
}

impl ReservationState {
    /// Whether the attempt has finished.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::GateRejected | Self::Committed | Self::StoreConflict | Self::StoreError
        )
    }

    /// Whether `next` is a legal successor of `self`.
    pub fn can_transition_to(&self, next: Self) -> bool {
        use ReservationState::*;
        matches!(
            (self, next),
            (Requested, GateChecking)
                | (GateChecking, GateRejected | GateGranted | StoreError)
                | (GateGranted, StoreCommitting)
                | (StoreCommitting, Committed | StoreConflict | StoreError)
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Requested => "requested",
            Self::GateChecking => "gate_checking",
            Self::GateRejected => "gate_rejected",
            Self::GateGranted => "gate_granted",
            Self::StoreCommitting => "store_committing",
            Self::Committed => "committed",
            Self::StoreConflict => "store_conflict",
            Self::StoreError => "store_error",
        }
    }
}

impl fmt::Display for ReservationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Terminal, non-error result of a reservation attempt.
///
/// Transient failures are not outcomes; they are returned as retryable
/// [`AppError`]s.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReservationOutcome {
    /// The seat was committed to the requester.
    Created(Booking),
    /// Another requester holds the gate claim; the store was not touched.
    Contended,
    /// The store reports the seat as unavailable.
    Conflict { reason: String },
    /// The seat does not exist.
    NotFound,
}

impl ReservationOutcome {
    /// Collapse the outcome into a booking or the matching error kind.
    pub fn into_booking(self, seat_id: i32) -> Result<Booking, AppError> {
        match self {
            Self::Created(booking) => Ok(booking),
            Self::Contended => Err(AppError::contended(format!(
                "Seat {seat_id} is currently being reserved by another user"
            ))),
            Self::Conflict { reason } => Err(AppError::conflict(format!(
                "Seat {seat_id} cannot be booked: {reason}"
            ))),
            Self::NotFound => Err(AppError::not_found(format!("Seat {seat_id} not found"))),
        }
    }

    /// Short label used in logs and the CLI race histogram.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Created(_) => "created",
            Self::Contended => "contended",
            Self::Conflict { .. } => "conflict",
            Self::NotFound => "not_found",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use boxoffice_core::error::ErrorKind;

    #[test]
    fn test_legal_paths() {
        use ReservationState::*;
        let happy = [Requested, GateChecking, GateGranted, StoreCommitting, Committed];
        for pair in happy.windows(2) {
            assert!(pair[0].can_transition_to(pair[1]), "{} -> {}", pair[0], pair[1]);
        }
        assert!(GateChecking.can_transition_to(GateRejected));
        assert!(StoreCommitting.can_transition_to(StoreConflict));
        assert!(!Requested.can_transition_to(StoreCommitting));
        assert!(!GateRejected.can_transition_to(StoreCommitting));
        assert!(!Committed.can_transition_to(StoreError));
    }

    #[test]
    fn test_terminal_states() {
        use ReservationState::*;
        for state in [GateRejected, Committed, StoreConflict, StoreError] {
            assert!(state.is_terminal());
        }
        for state in [Requested, GateChecking, GateGranted, StoreCommitting] {
            assert!(!state.is_terminal());
        }
    }

    #[test]
    fn test_outcome_error_kinds() {
        let kind = |o: ReservationOutcome| o.into_booking(7).unwrap_err().kind;
        assert_eq!(kind(ReservationOutcome::Contended), ErrorKind::Contended);
        assert_eq!(
            kind(ReservationOutcome::Conflict {
                reason: "seat is already booked".into()
            }),
            ErrorKind::Conflict
        );
        assert_eq!(kind(ReservationOutcome::NotFound), ErrorKind::NotFound);
    }
}
