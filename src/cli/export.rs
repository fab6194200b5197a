//! CLI command for data export
//!
//! Writes the (optionally filtered) expense list as CSV, JSON or YAML to a
//! file or to stdout.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use clap::{Args, ValueEnum};
use tracing::info;

use crate::error::ExpenseResult;
use crate::export::{export_csv, export_json, export_yaml};
use crate::services::ExpenseService;
use crate::storage::Storage;

use super::FilterArgs;

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    /// CSV format (one row per expense)
    Csv,
    /// JSON format (expenses plus summary)
    Json,
    /// YAML format (human-readable)
    Yaml,
}

/// Arguments for `export`
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Export format
    #[arg(short, long, value_enum, default_value = "json")]
    pub format: ExportFormat,

    /// Output file path (stdout when omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    #[command(flatten)]
    pub filter: FilterArgs,
}

/// Handle the export command
pub fn handle_export_command(storage: &Storage, args: ExportArgs) -> ExpenseResult<()> {
    let service = ExpenseService::new(storage);
    let expenses = service.list(&args.filter.to_filter())?;

    match &args.output {
        Some(path) => {
            let file = File::create(path)?;
            let mut writer = BufWriter::new(file);
            write_format(&expenses, &mut writer, args.format, args.pretty)?;
            writer.flush()?;

            info!(path = %path.display(), count = expenses.len(), "exported expenses");
            println!(
                "Exported {} expense(s) to: {}",
                expenses.len(),
                path.display()
            );
        }
        None => {
            let stdout = io::stdout();
            let mut writer = stdout.lock();
            write_format(&expenses, &mut writer, args.format, args.pretty)?;
            writer.flush()?;
        }
    }

    Ok(())
}

fn write_format<W: Write>(
    expenses: &[crate::models::Expense],
    writer: W,
    format: ExportFormat,
    pretty: bool,
) -> ExpenseResult<()> {
    match format {
        ExportFormat::Csv => export_csv(expenses, writer),
        ExportFormat::Json => export_json(expenses, writer, pretty),
        ExportFormat::Yaml => export_yaml(expenses, writer),
    }
}
