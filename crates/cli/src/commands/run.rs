//! `run` command implementation.

use std::path::Path;
use std::thread;
use std::time::Duration;

use tracing::{info, warn};

use config_loader::{ConfigLoader, Settings, KEY_TOKEN};
use contracts::{BatchOutcome, Notifier};
use dispatcher::LogNotifier;
use plugin::{PluginInstance, SlackPlugin};

use crate::batch::read_batch;
use crate::cli::RunArgs;
use crate::error::{CliError, Result};
use crate::stats::RunStats;

/// Execute the `run` command
pub fn run_replay(args: &RunArgs) -> Result<RunStats> {
    let settings = load_settings(args)?;

    let stats = if args.dry_run {
        info!("Dry run mode - messages are logged, not sent");
        let mut instance = PluginInstance::<LogNotifier>::register();
        let status = instance.init_with(&settings, |_| Ok(LogNotifier::new("dry-run")));
        replay(&mut instance, status.code(), args)?
    } else {
        let mut instance = SlackPlugin::register();
        let status = instance.init(&settings);
        replay(&mut instance, status.code(), args)?
    };

    stats.print_summary();
    Ok(stats)
}

fn load_settings(args: &RunArgs) -> Result<Settings> {
    if !args.config.exists() {
        return Err(CliError::config_not_found(args.config.display().to_string()));
    }
    info!(config = %args.config.display(), "Loading settings");

    let mut settings = ConfigLoader::read_settings(&args.config)?;
    if let Some(ref token) = args.token {
        info!("Overriding token from CLI/environment");
        settings.insert(KEY_TOKEN.to_string(), token.clone());
    }
    Ok(settings)
}

fn replay<N: Notifier>(
    instance: &mut PluginInstance<N>,
    init_code: i32,
    args: &RunArgs,
) -> Result<RunStats> {
    let Some(output) = instance.output() else {
        warn!(code = init_code, "Plugin did not start");
        return Err(CliError::PluginInit);
    };

    let mut stats = RunStats::default();
    for path in &args.batches {
        let outcome = flush_with_retries(output, path, args, &mut stats)?;
        println!("{}: {}", path.display(), outcome);
        stats.record_outcome(outcome);
    }

    instance.exit();
    Ok(stats)
}

fn flush_with_retries<N: Notifier>(
    output: &plugin::OutputPlugin<N>,
    path: &Path,
    args: &RunArgs,
    stats: &mut RunStats,
) -> Result<BatchOutcome> {
    let batch = read_batch(path)?;
    info!(batch = %path.display(), records = batch.len(), "Flushing batch");

    let mut attempt = 0;
    loop {
        let report = output.flush_report(&batch, &args.tag);
        stats.sent += report.sent as u64;
        stats.skipped += report.skipped as u64;

        if report.outcome != BatchOutcome::RetryRequested || attempt >= args.max_retries {
            return Ok(report.outcome);
        }

        attempt += 1;
        stats.redeliveries += 1;
        warn!(
            batch = %path.display(),
            attempt,
            max_retries = args.max_retries,
            "Batch asked for retry, redelivering"
        );
        thread::sleep(Duration::from_millis(args.retry_delay_ms));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;

    fn write_file(suffix: &str, content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    fn args(config: PathBuf, batches: Vec<PathBuf>) -> RunArgs {
        RunArgs {
            config,
            token: None,
            batches,
            tag: "test".to_string(),
            max_retries: 0,
            retry_delay_ms: 0,
            dry_run: true,
        }
    }

    #[test]
    fn test_dry_run_replay() {
        let config = write_file(
            ".toml",
            "token = \"xoxb-test\"\nuser_key = \"to\"\n[users]\nalice = \"U123\"\n",
        );
        let batch = write_file(
            ".jsonl",
            "[1700000000, {\"to\": \"alice\", \"msg\": \"a\"}]\n[1700000000, {\"to\": \"bob\"}]\n",
        );

        let stats = run_replay(&args(
            config.path().to_path_buf(),
            vec![batch.path().to_path_buf()],
        ))
        .unwrap();

        assert_eq!(stats.batches, 1);
        assert_eq!(stats.delivered_with_skips, 1);
        assert_eq!(stats.sent, 1);
        assert_eq!(stats.skipped, 1);
    }

    #[test]
    fn test_missing_settings_file() {
        let err = run_replay(&args(PathBuf::from("/nonexistent/notifier.toml"), vec![]))
            .unwrap_err();
        assert!(matches!(err, CliError::ConfigNotFound { .. }));
    }

    #[test]
    fn test_invalid_settings_fail_init() {
        let config = write_file(".toml", "token = \"xoxb-test\"\nuser_key = \"to\"\n");
        let batch = write_file(".jsonl", "[1, {\"to\": \"alice\"}]\n");

        let err = run_replay(&args(
            config.path().to_path_buf(),
            vec![batch.path().to_path_buf()],
        ))
        .unwrap_err();
        assert!(matches!(err, CliError::PluginInit));
    }
}
