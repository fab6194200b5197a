//! CLI command for the change history

use clap::Args;

use crate::config::Settings;
use crate::display::format_change;
use crate::error::ExpenseResult;
use crate::storage::Storage;

/// Arguments for `history`
#[derive(Args, Debug)]
pub struct HistoryArgs {
    /// Only show changes to the expense with this ID or ID prefix
    pub id: Option<String>,

    /// Number of most recent entries to show
    #[arg(short = 'n', long, default_value = "20")]
    pub limit: usize,
}

/// Print recent changes, oldest first
///
/// Deleted expenses stay addressable here by ID prefix.
pub fn handle_history_command(
    storage: &Storage,
    settings: &Settings,
    args: HistoryArgs,
) -> ExpenseResult<()> {
    let records = storage
        .history()
        .recent(args.limit, args.id.as_deref().map(str::trim))?;

    if records.is_empty() {
        println!("No history recorded yet.");
        return Ok(());
    }

    for record in &records {
        println!("{}", format_change(record, settings));
    }

    Ok(())
}
