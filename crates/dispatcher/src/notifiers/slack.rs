//! SlackNotifier - direct messages through the Slack Web API

use std::time::Duration;

use contracts::{ContractError, Notifier, NotifierConfig, PLUGIN_NAME};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::error::DispatcherError;

/// `chat.postMessage` request body
#[derive(Debug, Clone, Serialize)]
pub struct PostMessage<'a> {
    pub channel: &'a str,
    pub text: &'a str,
    pub as_user: bool,
}

/// Common Web API response envelope
#[derive(Debug, Clone, Deserialize)]
pub struct SlackResponse {
    pub ok: bool,
    #[serde(default)]
    pub error: Option<String>,
}

/// Notifier that posts each message as the authenticated bot identity
pub struct SlackNotifier {
    name: String,
    client: reqwest::Client,
    endpoint: String,
    token: String,
    as_user: bool,
    timeout: Duration,
}

impl SlackNotifier {
    /// Create a notifier with its own HTTP client
    ///
    /// The client enforces `config.timeout` on every request.
    pub fn new(config: &NotifierConfig) -> Result<Self, DispatcherError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| DispatcherError::notifier_creation("slack", e.to_string()))?;
        Ok(Self::with_client(config, client))
    }

    /// Create a notifier around an existing HTTP client
    pub fn with_client(config: &NotifierConfig, client: reqwest::Client) -> Self {
        Self {
            name: "slack".to_string(),
            client,
            endpoint: format!("{}/chat.postMessage", config.api_url.trim_end_matches('/')),
            token: config.token.clone(),
            as_user: config.as_user,
            timeout: config.timeout,
        }
    }

    /// Full `chat.postMessage` URL
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn request_error(&self, channel_id: &str, e: reqwest::Error) -> ContractError {
        if e.is_timeout() {
            ContractError::NotifyTimeout {
                channel_id: channel_id.to_string(),
                timeout_ms: u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX),
            }
        } else {
            ContractError::notify_transport(channel_id, e.to_string())
        }
    }

    fn status_error(channel_id: &str, response: &reqwest::Response) -> ContractError {
        let status = response.status();
        let reason = if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .unwrap_or("unknown");
            format!("HTTP {status}, retry after {retry_after}s")
        } else {
            format!("HTTP {status}")
        };
        ContractError::notify_rejected(channel_id, reason)
    }
}

impl Notifier for SlackNotifier {
    fn name(&self) -> &str {
        &self.name
    }

    #[instrument(
        name = "slack_notifier_notify",
        skip(self, text),
        fields(plugin = PLUGIN_NAME, notifier = %self.name, bytes = text.len())
    )]
    async fn notify(&self, channel_id: &str, text: &str) -> Result<(), ContractError> {
        let body = PostMessage {
            channel: channel_id,
            text,
            as_user: self.as_user,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.token)
            .json(&body)
            .send()
            .await
            .map_err(|e| self.request_error(channel_id, e))?;

        if !response.status().is_success() {
            return Err(Self::status_error(channel_id, &response));
        }

        let reply: SlackResponse = response
            .json()
            .await
            .map_err(|e| self.request_error(channel_id, e))?;

        if !reply.ok {
            return Err(ContractError::notify_rejected(
                channel_id,
                reply.error.unwrap_or_else(|| "unknown_error".to_string()),
            ));
        }

        debug!(channel_id, "chat.postMessage accepted");
        Ok(())
    }
}
