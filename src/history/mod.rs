//! Change history
//!
//! Every successful add, edit and delete is appended to a line-delimited
//! JSON log as a typed [`ExpenseChange`]. An edit stores the previous value
//! plus an [`ExpensePatch`](crate::models::ExpensePatch) holding only the
//! fields that changed.

mod change;
mod journal;

pub use change::{ChangeRecord, ExpenseChange};
pub use journal::HistoryLog;
