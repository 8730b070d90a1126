//! Dispatcher error types

use contracts::ContractError;
use thiserror::Error;

/// Per-record recipient resolution failures
///
/// All variants are skippable: the record is dropped and the batch continues.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// Record carries no recipient field
    #[error("unable to identify recipient by using key '{key}' from the message body")]
    MissingField { key: String },

    /// Recipient field holds something other than text
    #[error("failed to convert recipient under key '{key}' to text format: found {kind}")]
    UnsupportedValueType { key: String, kind: &'static str },

    /// Recipient not present in the directory
    #[error("failed to retrieve id for recipient '{name}'")]
    UnknownRecipient { name: String },
}

/// Dispatcher-specific errors
#[derive(Debug, Error)]
pub enum DispatcherError {
    /// Notifier creation error
    #[error("failed to create notifier '{name}': {message}")]
    NotifierCreation { name: String, message: String },
}

impl DispatcherError {
    /// Create a notifier creation error
    pub fn notifier_creation(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::NotifierCreation {
            name: name.into(),
            message: message.into(),
        }
    }
}

impl From<DispatcherError> for ContractError {
    fn from(err: DispatcherError) -> Self {
        ContractError::Other(err.to_string())
    }
}
