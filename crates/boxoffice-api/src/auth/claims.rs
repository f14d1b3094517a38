//! JWT claims accepted by the API.

use serde::{Deserialize, Serialize};

/// Claims payload of an access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// The authenticated user's ID.
    pub user_id: i32,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
}
