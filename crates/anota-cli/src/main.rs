//! CLI for logging expenses and income from free-text chat messages.

mod commands;
mod local;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use commands::{batch, config, directory, interpret, log};

/// anota - Turn chat messages like "gastei 50 no mercado" into ledger rows
#[derive(Parser)]
#[command(name = "anota")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Interpret a message without recording it
    Interpret(interpret::InterpretArgs),

    /// Handle one chat message and record it in the chat's ledger
    Log(log::LogArgs),

    /// Handle every line of a file as a chat message
    Batch(batch::BatchArgs),

    /// Assign a ledger location to a chat
    Register(directory::RegisterArgs),

    /// Show the ledger location of a chat
    Resolve(directory::ChatArgs),

    /// List the rows recorded for a chat
    Rows(directory::RowsArgs),

    /// Manage configuration
    Config(config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let config_path = cli.config.as_deref();
    match cli.command {
        Commands::Interpret(args) => interpret::run(args, config_path).await,
        Commands::Log(args) => log::run(args, config_path).await,
        Commands::Batch(args) => batch::run(args, config_path).await,
        Commands::Register(args) => directory::register(args, config_path).await,
        Commands::Resolve(args) => directory::resolve(args, config_path).await,
        Commands::Rows(args) => directory::rows(args, config_path).await,
        Commands::Config(args) => config::run(args, config_path).await,
    }
}
