//! CSV Export functionality
//!
//! One row per expense, amounts in currency units with two decimals.

use std::io::Write;

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::Expense;

const HEADER: [&str; 5] = ["ID", "Title", "Amount", "Category", "Date"];

/// Write expenses as CSV
pub fn export_csv<W: Write>(expenses: &[Expense], writer: W) -> ExpenseResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer.write_record(HEADER)?;

    for expense in expenses {
        let amount = format!("{:.2}", expense.amount.units());
        let date = expense.date.format("%Y-%m-%d").to_string();
        csv_writer.write_record([
            expense.id.as_str(),
            expense.title.as_str(),
            amount.as_str(),
            expense.category.as_str(),
            date.as_str(),
        ])?;
    }

    csv_writer
        .flush()
        .map_err(|e| ExpenseError::Export(e.to_string()))
}
