//! Display formatting for terminal output

pub mod expense;
pub mod history;

pub use expense::{format_expense_details, format_expense_table};
pub use history::format_change;
