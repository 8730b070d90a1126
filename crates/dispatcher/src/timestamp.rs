//! Timestamp normalization

use chrono::{DateTime, Utc};
use tracing::warn;

use contracts::RawTimestamp;

/// Convert the host's event time to wall-clock time
///
/// Unrecognized shapes, and values outside the representable range, fall back
/// to the current time with a warning. The record is still delivered.
pub fn normalize_timestamp(raw: &RawTimestamp) -> DateTime<Utc> {
    let converted = match raw {
        RawTimestamp::EventTime { secs, nanos } => DateTime::from_timestamp(*secs, *nanos),
        RawTimestamp::UnixSeconds(secs) => i64::try_from(*secs)
            .ok()
            .and_then(|secs| DateTime::from_timestamp(secs, 0)),
        RawTimestamp::Unrecognized(_) => None,
    };

    converted.unwrap_or_else(|| {
        warn!(timestamp = ?raw, "timestamp isn't known format, use current time");
        Utc::now()
    })
}
