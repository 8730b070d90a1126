//! Notifier implementations
//!
//! Contains SlackNotifier, LogNotifier, and MockNotifier.

mod log;
mod mock;
mod slack;

pub use self::log::LogNotifier;
pub use self::mock::{MockNotifier, SentMessage};
pub use self::slack::{PostMessage, SlackNotifier, SlackResponse};
