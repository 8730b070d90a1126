//! Replay statistics.

use contracts::BatchOutcome;
use serde::Serialize;

/// Totals over one `run` invocation
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunStats {
    /// Batch files processed
    pub batches: u64,

    /// Batches answered `Delivered`
    pub delivered: u64,

    /// Batches answered `DeliveredWithSkips`
    pub delivered_with_skips: u64,

    /// Batches still asking for retry after the last attempt
    pub retry_requested: u64,

    /// Redeliveries performed
    pub redeliveries: u64,

    /// Messages sent (counted across redeliveries)
    pub sent: u64,

    /// Records skipped (counted across redeliveries)
    pub skipped: u64,
}

impl RunStats {
    /// Account for the final outcome of one batch
    pub fn record_outcome(&mut self, outcome: BatchOutcome) {
        self.batches += 1;
        match outcome {
            BatchOutcome::Delivered => self.delivered += 1,
            BatchOutcome::DeliveredWithSkips => self.delivered_with_skips += 1,
            BatchOutcome::RetryRequested => self.retry_requested += 1,
        }
    }

    /// Whether every batch eventually completed
    pub fn all_complete(&self) -> bool {
        self.retry_requested == 0
    }

    /// Print detailed summary
    pub fn print_summary(&self) {
        println!("\nReplay Statistics");
        println!("   ├─ Batches: {}", self.batches);
        println!("   ├─ Delivered: {}", self.delivered);
        println!("   ├─ Delivered with skips: {}", self.delivered_with_skips);
        println!("   ├─ Retry requested: {}", self.retry_requested);
        println!("   ├─ Redeliveries: {}", self.redeliveries);
        println!("   ├─ Messages sent: {}", self.sent);
        println!("   └─ Records skipped: {}", self.skipped);
        println!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_outcome() {
        let mut stats = RunStats::default();
        stats.record_outcome(BatchOutcome::Delivered);
        stats.record_outcome(BatchOutcome::DeliveredWithSkips);
        assert!(stats.all_complete());

        stats.record_outcome(BatchOutcome::RetryRequested);
        assert_eq!(stats.batches, 3);
        assert!(!stats.all_complete());
    }
}
