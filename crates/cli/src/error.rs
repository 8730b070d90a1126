//! Error types for CLI operations.

use thiserror::Error;

/// CLI-specific error types
#[derive(Error, Debug)]
pub enum CliError {
    /// Settings file not found
    #[error("Settings file not found: {path}")]
    ConfigNotFound { path: String },

    /// Batch line could not be decoded
    #[error("Invalid batch line {line} in {path}: {message}")]
    BatchParse {
        path: String,
        line: usize,
        message: String,
    },

    /// Plugin refused to start
    #[error("Plugin initialization failed, see diagnostics above")]
    PluginInit,

    /// Configuration error
    #[error(transparent)]
    Config(#[from] contracts::ContractError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub fn config_not_found(path: impl Into<String>) -> Self {
        Self::ConfigNotFound { path: path.into() }
    }

    pub fn batch_parse(path: impl Into<String>, line: usize, message: impl Into<String>) -> Self {
        Self::BatchParse {
            path: path.into(),
            line,
            message: message.into(),
        }
    }
}

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;
