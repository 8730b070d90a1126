//! LogNotifier - writes messages to the diagnostic stream instead of sending

use contracts::{ContractError, Notifier, PLUGIN_NAME};
use tracing::{info, instrument};

/// Notifier that only logs what would be sent (dry runs)
pub struct LogNotifier {
    name: String,
}

impl LogNotifier {
    /// Create a new LogNotifier with the given name
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Notifier for LogNotifier {
    fn name(&self) -> &str {
        &self.name
    }

    #[instrument(
        name = "log_notifier_notify",
        skip(self, text),
        fields(plugin = PLUGIN_NAME, notifier = %self.name)
    )]
    async fn notify(&self, channel_id: &str, text: &str) -> Result<(), ContractError> {
        info!(channel_id, text, "dry run, message not sent");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::capture_json;

    #[test]
    fn test_dry_run_line_carries_plugin_name() {
        let notifier = LogNotifier::new("dry-run");
        let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();

        let lines = capture_json(|| {
            runtime.block_on(notifier.notify("U123", "hello")).unwrap();
        });

        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0]["fields"]["message"], "dry run, message not sent");
        assert_eq!(lines[0]["fields"]["channel_id"], "U123");
        assert_eq!(lines[0]["span"]["name"], "log_notifier_notify");
        assert_eq!(lines[0]["span"]["plugin"], PLUGIN_NAME);
    }

    #[tokio::test]
    async fn test_log_notifier_notify() {
        let notifier = LogNotifier::new("test_log");
        assert!(notifier.notify("U123", "hello").await.is_ok());
    }

    #[tokio::test]
    async fn test_log_notifier_name() {
        let notifier = LogNotifier::new("my_logger");
        assert_eq!(notifier.name(), "my_logger");
    }
}
