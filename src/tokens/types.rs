//! Stored token record
//!
//! Serialized to JSON by the file-backed store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A cached bearer token for one host
///
/// The token is opaque and carries no expiry the client could check;
/// staleness is discovered only through a failed request. `issued_at`
/// is recorded for inspection and never consulted by the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredToken {
    /// The bearer token value
    pub token: String,

    /// When this token was obtained
    pub issued_at: DateTime<Utc>,
}

impl StoredToken {
    /// Record a freshly issued token
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            issued_at: Utc::now(),
        }
    }
}
