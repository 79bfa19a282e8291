//! Interpret command - show the record a message would produce.

use chrono::NaiveDate;
use clap::Args;
use tracing::info;

use anota_core::models::record::{TransactionRecord, LEDGER_COLUMNS};
use anota_core::phrase::rules::format_brl_amount;
use anota_core::PhraseInterpreter;

/// Arguments for the interpret command.
#[derive(Args)]
pub struct InterpretArgs {
    /// Message text
    #[arg(required = true)]
    text: String,

    /// Receipt date (YYYY-MM-DD); defaults to today in the configured offset
    #[arg(short, long)]
    date: Option<NaiveDate>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output with the ledger header
    Csv,
    /// Plain text summary
    Text,
}

pub async fn run(args: InterpretArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = super::load_config(config_path)?;
    let interpreter = PhraseInterpreter::from_config(&config.interpreter)?;

    let received_on = args.date.unwrap_or_else(|| interpreter.today());
    info!("interpreting message received on {}", received_on);

    let record = interpreter.interpret_on(&args.text, received_on)?;
    println!("{}", format_record(&record, args.format)?);

    Ok(())
}

pub fn format_record(record: &TransactionRecord, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(record)?),
        OutputFormat::Csv => format_record_csv(record),
        OutputFormat::Text => Ok(format_record_text(record)),
    }
}

fn format_record_csv(record: &TransactionRecord) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(LEDGER_COLUMNS)?;
    wtr.write_record(record.to_row().cells())?;

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data.trim_end().to_string())
}

fn format_record_text(record: &TransactionRecord) -> String {
    let mut output = String::new();

    output.push_str(&format!("Date:         {}\n", record.date().format("%d/%m/%Y")));
    output.push_str(&format!("Type:         {}\n", record.transaction_type().label()));
    output.push_str(&format!("Group:        {}\n", record.group().label()));
    output.push_str(&format!("Category:     {}\n", record.category()));
    if !record.description().is_empty() {
        output.push_str(&format!("Description:  {}\n", record.description()));
    }
    output.push_str(&format!("Amount:       R$ {}\n", format_brl_amount(record.amount())));
    output.push_str(&format!("Payment:      {}\n", record.payment_method().label()));
    output.push_str(&format!("Installments: {}", record.installment().label()));

    output
}
