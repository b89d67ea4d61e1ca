//! Wall-clock stamps.
//!
//! The sync protocol orders whole-state replicas by a single epoch-ms
//! "last writer" clock. It is not a vector clock: it can order concurrent
//! edits, never detect them.

use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

/// Epoch milliseconds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct WallClock(pub u64);

impl WallClock {
    pub fn now() -> Self {
        use std::time::{SystemTime, UNIX_EPOCH};
        let ms = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64;
        Self(ms)
    }

    /// Next local stamp after `prev`: never decreases, strictly greater
    /// than the previous stamp even when the wall clock stalls.
    pub fn next_stamp(prev: u64) -> u64 {
        Self::now().0.max(prev.saturating_add(1))
    }

    pub fn to_datetime(self) -> OffsetDateTime {
        OffsetDateTime::from_unix_timestamp_nanos(i128::from(self.0) * 1_000_000)
            .unwrap_or(OffsetDateTime::UNIX_EPOCH)
    }

    pub fn from_datetime(at: OffsetDateTime) -> Self {
        let ms = at.unix_timestamp_nanos() / 1_000_000;
        Self(u64::try_from(ms).unwrap_or(0))
    }
}

/// Current instant as an RFC 3339 string, for entity `createdAt` fields.
pub fn now_rfc3339() -> String {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_default()
}
