//! BatchOutcome - Dispatcher verdict per batch

use serde::{Deserialize, Serialize};
use std::fmt;

/// Batch-level result returned to the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchOutcome {
    /// Every record was sent
    Delivered,

    /// Batch completed, at least one record skipped
    DeliveredWithSkips,

    /// A send failed; the host should redeliver the whole batch
    RetryRequested,
}

impl BatchOutcome {
    /// Whether the host may drop the batch
    pub fn is_complete(self) -> bool {
        !matches!(self, Self::RetryRequested)
    }
}

impl fmt::Display for BatchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Delivered => "delivered",
            Self::DeliveredWithSkips => "delivered_with_skips",
            Self::RetryRequested => "retry_requested",
        };
        f.write_str(s)
    }
}
