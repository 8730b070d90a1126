//! # Contracts
//!
//! Frozen interface contracts shared by every crate of the notifier.
//! Business crates depend only on this crate, reverse dependencies are prohibited.
//!
//! ## Data Model
//! - A [`LogEvent`] is one `(timestamp, record)` pair decoded by the host
//! - A [`Record`] is an unordered field set; consumers impose their own order
//! - A [`BatchOutcome`] is the single verdict returned to the host per batch

mod config;
mod directory;
mod error;
mod notifier;
mod outcome;
mod record;
mod timestamp;

pub use config::*;
pub use directory::RecipientDirectory;
pub use error::*;
pub use notifier::{LocalNotifier, Notifier};
pub use outcome::*;
pub use record::*;
pub use timestamp::RawTimestamp;

/// Name under which the plugin registers with the host and tags its diagnostics
pub const PLUGIN_NAME: &str = "slack_personal_notifier";

/// Human readable plugin description reported at registration
pub const PLUGIN_DESCRIPTION: &str = "Send personalized direct messages via Slack";
