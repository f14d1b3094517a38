//! Request context carrying the authenticated requester.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Context for the current authenticated request.
///
/// Built by the API layer from verified token claims (or by the CLI for
/// synthetic requesters) and passed into service methods.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The authenticated user's ID.
    pub user_id: i32,
    /// Correlation ID for log lines belonging to this request.
    pub request_id: Uuid,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a context for `user_id` with a fresh request ID.
    pub fn new(user_id: i32) -> Self {
        Self {
            user_id,
            request_id: Uuid::new_v4(),
            request_time: Utc::now(),
        }
    }

    /// The holder token this requester presents at the lock gate.
    pub fn gate_token(&self) -> String {
        self.user_id.to_string()
    }
}
