//! The remote backend's interface.
//!
//! An authenticated, user-scoped key-value endpoint with upsert
//! (create-or-replace) semantics. The engine only ever reads the latest
//! record and fully replaces it; `updated_at` is ISO-8601 on the wire.

use thiserror::Error;
use time::OffsetDateTime;

use crate::core::{UserId, WallClock};
use crate::error::Transience;

/// The stored remote record for a user.
#[derive(Clone, Debug)]
pub struct RemoteRecord {
    /// The full state JSON.
    pub data: serde_json::Value,
    pub updated_at: OffsetDateTime,
}

impl RemoteRecord {
    pub fn updated_at_ms(&self) -> u64 {
        WallClock::from_datetime(self.updated_at).0
    }
}

#[derive(Error, Debug)]
pub enum RemoteError {
    /// Network-level failure; the request may not have reached the backend.
    #[error("remote unavailable: {0}")]
    Unavailable(String),

    /// The session is not (or no longer) authenticated.
    #[error("authentication failed: {0}")]
    Unauthorized(String),

    /// The backend refused the write.
    #[error("remote rejected request: {0}")]
    Rejected(String),
}

impl RemoteError {
    pub fn transience(&self) -> Transience {
        match self {
            RemoteError::Unavailable(_) => Transience::Retryable,
            RemoteError::Unauthorized(_) => Transience::Permanent,
            RemoteError::Rejected(_) => Transience::Unknown,
        }
    }
}

/// Adapter over the account-scoped remote store.
pub trait RemoteStore {
    /// Latest record for the user, `None` if the user has never synced.
    fn get_latest(&self, user: &UserId) -> Result<Option<RemoteRecord>, RemoteError>;

    /// Create or fully replace the user's record.
    fn upsert(
        &self,
        user: &UserId,
        data: &serde_json::Value,
        updated_at: OffsetDateTime,
    ) -> Result<(), RemoteError>;
}
