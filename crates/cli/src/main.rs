//! # Slack Notifier CLI
//!
//! 命令行接口入口点。
//!
//! 提供：
//! - 插件配置验证
//! - 批次回放（经由插件生命周期发送私信）
//! - 消息渲染预览

mod batch;
mod cli;
mod commands;
mod error;
mod stats;

use anyhow::Result;
use clap::Parser;
use tracing::info;

use cli::{Cli, Commands};
use commands::{run_render, run_replay, run_validate};
use observability::ObservabilityConfig;

fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    init_logging(&cli)?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        "Slack Notifier CLI starting"
    );

    let result = match &cli.command {
        Commands::Run(args) => run_replay(args).map_err(anyhow::Error::from).and_then(|stats| {
            if stats.all_complete() {
                Ok(())
            } else {
                anyhow::bail!("{} batch(es) still requested a retry", stats.retry_requested)
            }
        }),
        Commands::Validate(args) => run_validate(args),
        Commands::Render(args) => run_render(args).map_err(anyhow::Error::from),
    };

    if let Err(ref e) = result {
        tracing::error!(error = %e, "Command failed");
    }

    result
}

/// Initialize logging based on CLI options
fn init_logging(cli: &Cli) -> Result<()> {
    let default_log_level = if cli.quiet {
        "warn"
    } else {
        match cli.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    observability::init_with_config(ObservabilityConfig {
        log_format: cli.log_format.into(),
        default_log_level: default_log_level.to_string(),
    })
}
