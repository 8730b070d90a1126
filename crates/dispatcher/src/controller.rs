//! DispatchController - per-batch resolve, render and send loop

use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use contracts::{BatchOutcome, ContractError, LogEvent, Notifier, NotifierConfig, PLUGIN_NAME};

use crate::error::ResolveError;
use crate::formatter::format_message;
use crate::metrics::DispatchMetrics;
use crate::resolver::resolve_recipient;
use crate::timestamp::normalize_timestamp;

/// Result of one flush
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchReport {
    /// Verdict for the host
    pub outcome: BatchOutcome,
    /// Records delivered before the batch ended
    pub sent: usize,
    /// Records skipped before the batch ended
    pub skipped: usize,
    /// Index of the record whose send failed, if the batch was aborted
    pub aborted_at: Option<usize>,
}

/// What happened to one record
enum EventOutcome {
    Sent,
    Skipped,
    Failed(ContractError),
}

/// Drives one batch at a time through resolver, formatter and notifier
///
/// Holds the immutable configuration for the plugin's lifetime. Records are
/// processed strictly in arrival order; the first failed send aborts the
/// batch and asks the host to redeliver all of it, so records sent before
/// the failure may be sent again.
pub struct DispatchController<N> {
    config: Arc<NotifierConfig>,
    notifier: N,
    metrics: DispatchMetrics,
}

impl<N: Notifier> DispatchController<N> {
    /// Create a controller owning `notifier`
    pub fn new(config: Arc<NotifierConfig>, notifier: N) -> Self {
        Self {
            config,
            notifier,
            metrics: DispatchMetrics::new(),
        }
    }

    /// Underlying notifier
    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Cumulative counters
    pub fn metrics(&self) -> &DispatchMetrics {
        &self.metrics
    }

    /// Process one batch and decide its outcome
    #[instrument(
        name = "dispatch_flush",
        skip(self, batch),
        fields(plugin = PLUGIN_NAME, notifier = %self.notifier.name(), records = batch.len())
    )]
    pub async fn flush(&self, batch: &[LogEvent]) -> BatchReport {
        self.metrics.inc_batch_count();

        let mut sent = 0;
        let mut skipped = 0;

        for (index, event) in batch.iter().enumerate() {
            match self.dispatch_event(event).await {
                EventOutcome::Sent => sent += 1,
                EventOutcome::Skipped => skipped += 1,
                EventOutcome::Failed(e) => {
                    self.metrics.inc_failure_count();
                    warn!(
                        record = index,
                        remaining = batch.len() - index - 1,
                        error = %e,
                        "send failed, requesting retry of the whole batch"
                    );
                    return BatchReport {
                        outcome: BatchOutcome::RetryRequested,
                        sent,
                        skipped,
                        aborted_at: Some(index),
                    };
                }
            }
        }

        let outcome = if skipped == 0 {
            BatchOutcome::Delivered
        } else {
            BatchOutcome::DeliveredWithSkips
        };
        debug!(sent, skipped, %outcome, "batch complete");

        BatchReport {
            outcome,
            sent,
            skipped,
            aborted_at: None,
        }
    }

    async fn dispatch_event(&self, event: &LogEvent) -> EventOutcome {
        let timestamp = normalize_timestamp(&event.timestamp);
        // Formatting runs for every record, resolvable or not.
        let message = format_message(timestamp, &event.record);

        let recipient = match resolve_recipient(
            &event.record,
            &self.config.user_key,
            &self.config.recipients,
        ) {
            Ok(recipient) => recipient,
            Err(e) => {
                log_skip(&e);
                self.metrics.inc_skipped_count();
                return EventOutcome::Skipped;
            }
        };

        match self.notifier.notify(&recipient.channel_id, &message).await {
            Ok(()) => {
                self.metrics.inc_sent_count();
                info!(
                    recipient = %recipient.raw_name,
                    channel_id = %recipient.channel_id,
                    "sent direct message to recipient '{}' with id '{}'",
                    recipient.raw_name,
                    recipient.channel_id
                );
                EventOutcome::Sent
            }
            Err(e) => EventOutcome::Failed(e),
        }
    }
}

fn log_skip(error: &ResolveError) {
    match error {
        ResolveError::MissingField { .. } | ResolveError::UnsupportedValueType { .. } => {
            debug!(error = %error, "record skipped");
        }
        ResolveError::UnknownRecipient { .. } => {
            warn!(error = %error, "record skipped");
        }
    }
}
