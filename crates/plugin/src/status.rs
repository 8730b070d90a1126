//! Host status codes and registration metadata

use contracts::{BatchOutcome, PLUGIN_DESCRIPTION, PLUGIN_NAME};

/// Return codes understood by the host's output-plugin interface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum FlbStatus {
    /// Unrecoverable failure (init) or unusable plugin (flush)
    Error = 0,
    /// Hook succeeded; for flush the batch may be dropped
    Ok = 1,
    /// Flush failed transiently; redeliver the whole batch later
    Retry = 2,
}

impl FlbStatus {
    /// Raw integer code handed to the host
    pub fn code(self) -> i32 {
        self as i32
    }
}

impl From<BatchOutcome> for FlbStatus {
    fn from(outcome: BatchOutcome) -> Self {
        match outcome {
            BatchOutcome::Delivered | BatchOutcome::DeliveredWithSkips => Self::Ok,
            BatchOutcome::RetryRequested => Self::Retry,
        }
    }
}

/// What the plugin reports to the host at registration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PluginRegistration {
    pub name: &'static str,
    pub description: &'static str,
}

impl Default for PluginRegistration {
    fn default() -> Self {
        Self {
            name: PLUGIN_NAME,
            description: PLUGIN_DESCRIPTION,
        }
    }
}
