//! Notifier trait - Dispatcher output interface
//!
//! Defines the abstract interface for chat-service senders.

use crate::ContractError;

/// Chat-service output trait
///
/// All notifier implementations must implement this trait.
#[trait_variant::make(Notifier: Send)]
pub trait LocalNotifier {
    /// Notifier name (used for logging)
    fn name(&self) -> &str;

    /// Deliver one rendered message to one resolved channel
    ///
    /// # Errors
    /// Any failure talking to the chat service; callers treat it as transient
    async fn notify(&self, channel_id: &str, text: &str) -> Result<(), ContractError>;
}
