//! Layered error definitions
//!
//! Categorized by source: config / notifier / general

use thiserror::Error;

/// Unified error type
#[derive(Debug, Error)]
pub enum ContractError {
    // ===== Configuration Errors =====
    /// Required setting absent or empty
    #[error("config error: setting '{key}' is required and cannot be empty")]
    ConfigMissing { key: String },

    /// Configuration parse error
    #[error("config parse error: {message}")]
    ConfigParse {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration validation error
    #[error("config validation error at '{field}': {message}")]
    ConfigValidation { field: String, message: String },

    // ===== Notifier Errors =====
    /// Request could not be delivered to the chat service
    #[error("failed to send message to recipient with id '{channel_id}': {message}")]
    NotifyTransport { channel_id: String, message: String },

    /// Chat service answered but refused the message
    #[error("chat service rejected message for recipient with id '{channel_id}': {reason}")]
    NotifyRejected { channel_id: String, reason: String },

    /// Request exceeded the configured timeout
    #[error("sending message to recipient with id '{channel_id}' timed out after {timeout_ms}ms")]
    NotifyTimeout { channel_id: String, timeout_ms: u64 },

    // ===== General Errors =====
    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Other error
    #[error("{0}")]
    Other(String),
}

impl ContractError {
    /// Create missing setting error
    pub fn config_missing(key: impl Into<String>) -> Self {
        Self::ConfigMissing { key: key.into() }
    }

    /// Create configuration parse error
    pub fn config_parse(message: impl Into<String>) -> Self {
        Self::ConfigParse {
            message: message.into(),
            source: None,
        }
    }

    /// Create configuration validation error
    pub fn config_validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create notifier transport error
    pub fn notify_transport(channel_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::NotifyTransport {
            channel_id: channel_id.into(),
            message: message.into(),
        }
    }

    /// Create notifier rejection error
    pub fn notify_rejected(channel_id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::NotifyRejected {
            channel_id: channel_id.into(),
            reason: reason.into(),
        }
    }

    /// Whether the failure happened while talking to the chat service.
    ///
    /// Every such failure is retried by the host as a whole batch.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::NotifyTransport { .. } | Self::NotifyRejected { .. } | Self::NotifyTimeout { .. }
        )
    }

    /// Whether the error prevents the plugin from starting
    pub fn is_config(&self) -> bool {
        matches!(
            self,
            Self::ConfigMissing { .. } | Self::ConfigParse { .. } | Self::ConfigValidation { .. }
        )
    }
}
