//! `render` command implementation.

use dispatcher::{format_message, normalize_timestamp};

use crate::batch::read_batch;
use crate::cli::RenderArgs;
use crate::error::Result;

/// Execute the `render` command
pub fn run_render(args: &RenderArgs) -> Result<()> {
    for path in &args.batches {
        for line in render_batch(&read_batch(path)?) {
            println!("{}", line);
        }
    }
    Ok(())
}

fn render_batch(batch: &[contracts::LogEvent]) -> Vec<String> {
    batch
        .iter()
        .map(|event| format_message(normalize_timestamp(&event.timestamp), &event.record))
        .collect()
}
