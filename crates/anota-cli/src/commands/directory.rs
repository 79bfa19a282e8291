//! Directory commands - register chats and inspect their ledgers.

use clap::Args;
use console::style;

use anota_core::ledger::{replies, LedgerDirectory, LedgerStore};
use anota_core::LedgerLocation;

/// Arguments for the register command.
#[derive(Args)]
pub struct RegisterArgs {
    /// Chat identifier
    chat: String,

    /// Spreadsheet path
    #[arg(long)]
    path: String,

    /// Worksheet inside the spreadsheet
    #[arg(long)]
    worksheet: String,

    /// Table inside the worksheet
    #[arg(long)]
    table: String,
}

/// Arguments for commands addressing one chat.
#[derive(Args)]
pub struct ChatArgs {
    /// Chat identifier
    chat: String,
}

/// Arguments for the rows command.
#[derive(Args)]
pub struct RowsArgs {
    /// Chat identifier
    chat: String,

    /// Only show the most recent N rows
    #[arg(short = 'n', long)]
    last: Option<usize>,

    /// Print rows as CSV
    #[arg(long)]
    csv: bool,
}

pub async fn register(args: RegisterArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = super::load_config(config_path)?;
    let directory = super::open_directory(&config);

    let location = LedgerLocation::new(args.path, args.worksheet, args.table);
    directory.register(&args.chat, location.clone())?;

    println!(
        "{} Chat {} now writes to {}",
        style("✓").green(),
        args.chat,
        location
    );

    Ok(())
}

pub async fn resolve(args: ChatArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = super::load_config(config_path)?;
    let location = super::require_registered(&super::open_directory(&config), &args.chat)?;

    println!("{}", location);

    Ok(())
}

pub async fn rows(args: RowsArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = super::load_config(config_path)?;
    let location = super::require_registered(&super::open_directory(&config), &args.chat)?;

    let rows = super::open_ledger(&config).list_rows(&location)?;
    let skip = args
        .last
        .map(|n| rows.len().saturating_sub(n))
        .unwrap_or(0);
    let rows = &rows[skip..];

    if args.csv {
        let mut wtr = csv::Writer::from_writer(std::io::stdout());
        wtr.write_record(anota_core::LEDGER_COLUMNS)?;
        for row in rows {
            wtr.write_record(row.cells())?;
        }
        wtr.flush()?;
    } else {
        println!("{}", replies::recent_rows(rows));
    }

    Ok(())
}
