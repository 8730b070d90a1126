//! NotifierConfig - Config Loader output
//!
//! Immutable plugin configuration, injected into the dispatcher at construction.

use std::fmt;
use std::time::Duration;

use crate::RecipientDirectory;

/// Default Slack Web API base URL
pub const DEFAULT_API_URL: &str = "https://slack.com/api";

/// Default chat-service request timeout (seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Complete plugin configuration
#[derive(Clone)]
pub struct NotifierConfig {
    /// Chat-service auth credential (never logged)
    pub token: String,

    /// Recipient name -> channel id
    pub recipients: RecipientDirectory,

    /// Record field holding the recipient's name
    pub user_key: String,

    /// Chat-service API base URL
    pub api_url: String,

    /// Per-request timeout
    pub timeout: Duration,

    /// Post as the authenticated bot identity
    pub as_user: bool,
}

impl NotifierConfig {
    /// Create configuration with default transport settings
    pub fn new(
        token: impl Into<String>,
        recipients: RecipientDirectory,
        user_key: impl Into<String>,
    ) -> Self {
        Self {
            token: token.into(),
            recipients,
            user_key: user_key.into(),
            api_url: DEFAULT_API_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            as_user: true,
        }
    }
}

impl fmt::Debug for NotifierConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotifierConfig")
            .field("token", &"***")
            .field("recipients", &self.recipients.names())
            .field("user_key", &self.user_key)
            .field("api_url", &self.api_url)
            .field("timeout", &self.timeout)
            .field("as_user", &self.as_user)
            .finish()
    }
}
