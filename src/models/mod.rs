//! Core data models for the expense tracker
//!
//! This module contains the data structures that represent the domain:
//! expenses, their categories, amounts and identifiers.

pub mod category;
pub mod expense;
pub mod ids;
pub mod money;

pub use category::{Category, UnknownCategory};
pub use expense::{Expense, ExpensePatch, ExpenseValidationError, NewExpense};
pub use ids::ExpenseId;
pub use money::{Money, MoneyParseError, MAX_CENTS};
