//! Log command - handle one chat message against local storage.

use chrono::NaiveDate;
use clap::Args;

use anota_core::HandleOutcome;

use crate::local::ConsoleSender;

/// Arguments for the log command.
#[derive(Args)]
pub struct LogArgs {
    /// Chat the message comes from
    #[arg(long)]
    chat: String,

    /// Message text, or a chat command such as /ultimos
    #[arg(required = true)]
    text: String,

    /// Receipt date (YYYY-MM-DD); defaults to today in the configured offset
    #[arg(short, long)]
    date: Option<NaiveDate>,
}

pub async fn run(args: LogArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = super::load_config(config_path)?;
    let handler = super::build_handler(&config, ConsoleSender)?;

    let outcome = match args.date {
        Some(date) => handler.handle_on(&args.chat, &args.text, date),
        None => handler.handle(&args.chat, &args.text),
    };

    // The reply has already been printed; only collaborator failures are fatal.
    if let HandleOutcome::Failed(error) = outcome {
        anyhow::bail!("message could not be recorded: {}", error);
    }

    Ok(())
}
