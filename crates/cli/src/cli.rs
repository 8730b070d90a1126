//! CLI argument definitions using clap.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Slack Notifier - personalized direct messages from structured log records
#[derive(Parser, Debug)]
#[command(
    name = "slack-notifier",
    author,
    version,
    about = "Replay log batches through the Slack personal notifier plugin",
    long_about = "Drives the slack_personal_notifier output plugin outside the log pipeline.\n\n\
                  Loads plugin settings, reads batches of [timestamp, record] JSON lines, \n\
                  resolves each record's recipient and sends it as a direct message."
)]
pub struct Cli {
    /// Increase logging verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true, env = "SLACK_NOTIFIER_VERBOSE")]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log output format
    #[arg(
        long,
        value_enum,
        default_value = "compact",
        global = true,
        env = "SLACK_NOTIFIER_LOG_FORMAT"
    )]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Flush batch files through the plugin
    Run(RunArgs),

    /// Validate plugin settings without sending anything
    Validate(ValidateArgs),

    /// Print the message each record of a batch renders to
    Render(RenderArgs),
}

/// Arguments for the `run` command
#[derive(Parser, Debug, Clone)]
pub struct RunArgs {
    /// Path to settings file (TOML or JSON)
    #[arg(
        short,
        long,
        default_value = "notifier.toml",
        env = "SLACK_NOTIFIER_CONFIG"
    )]
    pub config: PathBuf,

    /// Override the chat-service token from the settings file
    #[arg(long, env = "SLACK_NOTIFIER_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Batch files, one batch per file (JSON lines of [timestamp, record])
    #[arg(required = true)]
    pub batches: Vec<PathBuf>,

    /// Tag reported with each flush
    #[arg(long, default_value = "slack_notifier.replay")]
    pub tag: String,

    /// Redeliver a batch this many times after a retry request
    #[arg(long, default_value = "0", env = "SLACK_NOTIFIER_MAX_RETRIES")]
    pub max_retries: u32,

    /// Delay before redelivering a batch, in milliseconds
    #[arg(long, default_value = "1000")]
    pub retry_delay_ms: u64,

    /// Log messages instead of sending them
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the `validate` command
#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Path to settings file to validate
    #[arg(short, long, default_value = "notifier.toml")]
    pub config: PathBuf,

    /// Output validation result as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `render` command
#[derive(Parser, Debug)]
pub struct RenderArgs {
    /// Batch files to render
    #[arg(required = true)]
    pub batches: Vec<PathBuf>,
}

/// Log output format
#[derive(ValueEnum, Clone, Copy, Debug, Default)]
pub enum LogFormat {
    /// JSON structured logging
    Json,
    /// Human-readable pretty format
    Pretty,
    /// Compact single-line format
    #[default]
    Compact,
}

impl From<LogFormat> for observability::LogFormat {
    fn from(format: LogFormat) -> Self {
        match format {
            LogFormat::Json => Self::Json,
            LogFormat::Pretty => Self::Pretty,
            LogFormat::Compact => Self::Compact,
        }
    }
}
