//! RawTimestamp - event time as delivered by the host

/// Event time of one batch item
///
/// The host encodes event time either as its native `(seconds, nanoseconds)`
/// pair or as a plain Unix-seconds integer. Any other shape is preserved as
/// `Unrecognized` so the dispatcher can degrade to wall-clock time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawTimestamp {
    /// Host-native event time
    EventTime { secs: i64, nanos: u32 },

    /// Plain Unix seconds
    UnixSeconds(u64),

    /// Any other shape (description kept for diagnostics)
    Unrecognized(String),
}

impl RawTimestamp {
    /// Create host-native event time
    pub fn event_time(secs: i64, nanos: u32) -> Self {
        Self::EventTime { secs, nanos }
    }

    /// Create unrecognized timestamp from a shape description
    pub fn unrecognized(shape: impl Into<String>) -> Self {
        Self::Unrecognized(shape.into())
    }
}

impl From<u64> for RawTimestamp {
    fn from(secs: u64) -> Self {
        Self::UnixSeconds(secs)
    }
}
