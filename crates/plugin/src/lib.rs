//! # Plugin
//!
//! Host lifecycle surface of the notifier.
//!
//! The host drives the plugin through four hooks: register, init, flush
//! (once per batch) and exit. Each hook answers with one of the host's
//! status codes; nothing escapes as a panic.
//!
//! # Example
//!
//! ```no_run
//! use std::collections::HashMap;
//! use plugin::{FlbStatus, SlackPlugin};
//!
//! let mut instance = SlackPlugin::register();
//! let mut settings = HashMap::new();
//! settings.insert("token".to_string(), "xoxb-...".to_string());
//! settings.insert("users".to_string(), r#"{"alice": "U123"}"#.to_string());
//! settings.insert("user_key".to_string(), "to".to_string());
//!
//! assert_eq!(instance.init(&settings), FlbStatus::Ok);
//! // instance.flush(&batch, "app.logs");
//! instance.exit();
//! ```

mod lifecycle;
mod output;
mod status;

pub use lifecycle::{PluginInstance, SlackPlugin};
pub use output::OutputPlugin;
pub use status::{FlbStatus, PluginRegistration};
