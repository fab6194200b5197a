//! Reports module
//!
//! Derived views over the expense collection.

pub mod summary;

pub use summary::{percentage_of, CategoryShare, ExpenseSummary};
