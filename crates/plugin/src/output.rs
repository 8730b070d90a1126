//! OutputPlugin - an initialized plugin ready to flush batches

use std::sync::Arc;

use tokio::runtime::{Builder, Runtime};
use tracing::{info, info_span, instrument};

use config_loader::{ConfigLoader, ConfigSource};
use contracts::{ContractError, LogEvent, Notifier, NotifierConfig, PLUGIN_NAME};
use dispatcher::{BatchReport, DispatchController, MetricsSnapshot, SlackNotifier};

use crate::status::FlbStatus;

/// Initialized plugin
///
/// Owns the dispatch controller and a current-thread runtime used to drive
/// each flush to completion on the host's calling thread.
pub struct OutputPlugin<N> {
    controller: DispatchController<N>,
    runtime: Runtime,
}

impl OutputPlugin<SlackNotifier> {
    /// Initialize with the Slack Web API notifier
    ///
    /// # Errors
    /// Any configuration error, or failure to build the HTTP client or runtime
    pub fn init(source: &impl ConfigSource) -> Result<Self, ContractError> {
        Self::init_with(source, |config| Ok(SlackNotifier::new(config)?))
    }
}

impl<N: Notifier> OutputPlugin<N> {
    /// Initialize with a notifier built from the loaded configuration
    #[instrument(name = "plugin_init", skip(source, make_notifier), fields(plugin = PLUGIN_NAME))]
    pub fn init_with<F>(source: &impl ConfigSource, make_notifier: F) -> Result<Self, ContractError>
    where
        F: FnOnce(&NotifierConfig) -> Result<N, ContractError>,
    {
        let config = ConfigLoader::from_source(source)?;

        info!(
            token = "***",
            users = ?config.recipients.names(),
            user_key = %config.user_key,
            api_url = %config.api_url,
            timeout_secs = config.timeout.as_secs_f64(),
            "plugin configured"
        );

        let notifier = make_notifier(&config)?;
        let runtime = Builder::new_current_thread().enable_all().build()?;

        Ok(Self {
            controller: DispatchController::new(Arc::new(config), notifier),
            runtime,
        })
    }

    /// Dispatch controller (read-only access)
    pub fn controller(&self) -> &DispatchController<N> {
        &self.controller
    }

    /// Process one batch and return the detailed report
    ///
    /// Must not be called from inside an async runtime.
    pub fn flush_report(&self, batch: &[LogEvent], tag: &str) -> BatchReport {
        let span = info_span!("flush", plugin = PLUGIN_NAME, tag);
        let _guard = span.enter();
        self.runtime.block_on(self.controller.flush(batch))
    }

    /// Process one batch and answer with a host status code
    pub fn flush(&self, batch: &[LogEvent], tag: &str) -> FlbStatus {
        FlbStatus::from(self.flush_report(batch, tag).outcome)
    }

    /// Tear down and return the final counters
    pub fn exit(self) -> MetricsSnapshot {
        let snapshot = self.controller.metrics().snapshot();
        info!(
            plugin = PLUGIN_NAME,
            batches = snapshot.batch_count,
            sent = snapshot.sent_count,
            skipped = snapshot.skipped_count,
            failures = snapshot.failure_count,
            "plugin shutting down"
        );
        snapshot
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::{BatchOutcome, RawTimestamp};
    use dispatcher::MockNotifier;
    use std::collections::HashMap;

    fn settings() -> HashMap<String, String> {
        [
            ("token", "xoxb-test"),
            ("users", r#"{"alice": "U123"}"#),
            ("user_key", "to"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
    }

    #[test]
    fn test_init_with_mock_and_flush() {
        let mock = MockNotifier::new("mock");
        let handle = mock.clone();
        let plugin = OutputPlugin::init_with(&settings(), move |_| Ok(mock)).unwrap();

        let batch = vec![LogEvent::new(
            RawTimestamp::UnixSeconds(1_700_000_000),
            [("to", "alice"), ("msg", "hi")].into_iter().collect(),
        )];
        let report = plugin.flush_report(&batch, "app.logs");

        assert_eq!(report.outcome, BatchOutcome::Delivered);
        assert_eq!(handle.sent()[0].channel_id, "U123");

        let snapshot = plugin.exit();
        assert_eq!(snapshot.sent_count, 1);
    }

    #[test]
    fn test_init_fails_without_notifier_on_bad_config() {
        let mut bad = settings();
        bad.remove("users");
        let mut factory_called = false;
        let result = OutputPlugin::init_with(&bad, |_| {
            factory_called = true;
            Ok(MockNotifier::new("mock"))
        });
        assert!(result.is_err());
        assert!(!factory_called);
    }

    #[test]
    fn test_init_slack_notifier() {
        let plugin = OutputPlugin::init(&settings()).unwrap();
        assert_eq!(plugin.controller().notifier().endpoint(), "https://slack.com/api/chat.postMessage");
    }
}
