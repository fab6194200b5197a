//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod expense;
pub mod export;
pub mod history;

pub use expense::{handle_expense_command, ExpenseCommands};
pub use export::{handle_export_command, ExportArgs, ExportFormat};
pub use history::{handle_history_command, HistoryArgs};

use chrono::NaiveDate;
use clap::Args;

use crate::models::Category;
use crate::services::ExpenseFilter;

/// Category and date filters shared by list, summary and export
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Only include this category
    #[arg(short, long)]
    pub category: Option<Category>,

    /// Only include expenses on or after this date (YYYY-MM-DD)
    #[arg(long)]
    pub from: Option<NaiveDate>,

    /// Only include expenses on or before this date (YYYY-MM-DD)
    #[arg(long)]
    pub to: Option<NaiveDate>,
}

impl FilterArgs {
    pub fn to_filter(&self) -> ExpenseFilter {
        ExpenseFilter {
            category: self.category,
            start_date: self.from,
            end_date: self.to,
            limit: None,
        }
    }
}
