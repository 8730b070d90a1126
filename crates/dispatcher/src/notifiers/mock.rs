//! MockNotifier - in-memory notifier for tests and local pipelines
//!
//! Records every delivered message and can be told to fail a given attempt.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use contracts::{ContractError, Notifier};

/// One message accepted by the mock
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentMessage {
    pub channel_id: String,
    pub text: String,
}

/// Recording notifier
///
/// Clones share state, so a test can keep one handle while the controller
/// owns another.
#[derive(Debug, Clone)]
pub struct MockNotifier {
    name: String,
    sent: Arc<Mutex<Vec<SentMessage>>>,
    attempts: Arc<AtomicUsize>,
    /// Zero-based attempt index that fails
    fail_on: Option<usize>,
}

impl MockNotifier {
    /// Create a notifier that accepts everything
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sent: Arc::new(Mutex::new(Vec::new())),
            attempts: Arc::new(AtomicUsize::new(0)),
            fail_on: None,
        }
    }

    /// Fail the `attempt`-th send (zero-based) with a transport error
    pub fn failing_on(mut self, attempt: usize) -> Self {
        self.fail_on = Some(attempt);
        self
    }

    /// Messages accepted so far, in order
    pub fn sent(&self) -> Vec<SentMessage> {
        self.sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Send attempts so far, including failed ones
    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

impl Notifier for MockNotifier {
    fn name(&self) -> &str {
        &self.name
    }

    async fn notify(&self, channel_id: &str, text: &str) -> Result<(), ContractError> {
        let attempt = self.attempts.fetch_add(1, Ordering::SeqCst);
        if self.fail_on == Some(attempt) {
            return Err(ContractError::notify_transport(channel_id, "mock failure"));
        }

        self.sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(SentMessage {
                channel_id: channel_id.to_string(),
                text: text.to_string(),
            });
        Ok(())
    }
}
