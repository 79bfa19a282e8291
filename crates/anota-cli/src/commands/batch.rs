//! Batch command - replay a file of chat messages, one per line.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::NaiveDate;
use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{error, warn};

use anota_core::phrase::rules::format_brl_amount;
use anota_core::{HandleOutcome, RecordingSender};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Text file with one message per line
    #[arg(required = true)]
    input: PathBuf,

    /// Chat the messages come from
    #[arg(long)]
    chat: String,

    /// Receipt date (YYYY-MM-DD) applied to every message
    #[arg(short, long)]
    date: Option<NaiveDate>,

    /// Write a per-message summary CSV
    #[arg(long)]
    summary: Option<PathBuf>,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,
}

/// Result of handling one line.
struct LineResult {
    line: usize,
    text: String,
    outcome: HandleOutcome,
    reply: String,
}

impl LineResult {
    fn status(&self) -> &'static str {
        match &self.outcome {
            HandleOutcome::Recorded(_) => "recorded",
            HandleOutcome::Rejected(_) => "rejected",
            HandleOutcome::Unregistered => "unregistered",
            HandleOutcome::Command(_) => "command",
            HandleOutcome::Failed(_) => "failed",
        }
    }

    fn is_error(&self) -> bool {
        !matches!(
            self.outcome,
            HandleOutcome::Recorded(_) | HandleOutcome::Command(_)
        )
    }
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = super::load_config(config_path)?;

    let content = fs::read_to_string(&args.input)?;
    let messages: Vec<(usize, &str)> = content
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
        .collect();

    if messages.is_empty() {
        anyhow::bail!("No messages found in {}", args.input.display());
    }

    let handler = super::build_handler(&config, RecordingSender::new())?;
    super::require_registered(handler.directory(), &args.chat)?;

    println!(
        "{} Found {} messages to log",
        style("ℹ").blue(),
        messages.len()
    );

    let pb = ProgressBar::new(messages.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} messages")?
            .progress_chars("=>-"),
    );

    let mut results = Vec::with_capacity(messages.len());
    for (line, text) in messages {
        let outcome = match args.date {
            Some(date) => handler.handle_on(&args.chat, text, date),
            None => handler.handle(&args.chat, text),
        };
        let reply = handler
            .sender()
            .drain()
            .into_iter()
            .map(|(_, reply)| reply)
            .collect::<Vec<_>>()
            .join("\n");

        let result = LineResult {
            line,
            text: text.to_string(),
            outcome,
            reply,
        };

        if result.is_error() {
            if args.continue_on_error {
                warn!("line {}: {}", line, result.reply);
            } else {
                pb.abandon();
                error!("line {}: {}", line, result.reply);
                anyhow::bail!("Line {} was not recorded ({}): {}", line, result.status(), text);
            }
        }

        results.push(result);
        pb.inc(1);
    }

    pb.finish_with_message("Complete");

    if let Some(summary_path) = &args.summary {
        write_summary(summary_path, &results)?;
        println!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    let failed: Vec<_> = results.iter().filter(|r| r.is_error()).collect();

    println!();
    println!(
        "{} Processed {} messages in {:?}",
        style("✓").green(),
        results.len(),
        start.elapsed()
    );
    println!(
        "   {} recorded, {} not recorded",
        style(results.len() - failed.len()).green(),
        style(failed.len()).red()
    );

    if !failed.is_empty() {
        println!();
        println!("{}", style("Not recorded:").red());
        for result in &failed {
            println!("  - line {}: {}", result.line, result.text);
        }
    }

    Ok(())
}

fn write_summary(path: &Path, results: &[LineResult]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record(["line", "status", "text", "category", "amount", "reply"])?;

    for result in results {
        let (category, amount) = match &result.outcome {
            HandleOutcome::Recorded(record) => (
                record.category().to_string(),
                format_brl_amount(record.amount()),
            ),
            _ => (String::new(), String::new()),
        };

        wtr.write_record([
            result.line.to_string().as_str(),
            result.status(),
            &result.text,
            &category,
            &amount,
            &result.reply,
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
