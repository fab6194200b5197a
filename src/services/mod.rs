//! Service layer
//!
//! The service layer provides business logic on top of the storage layer,
//! handling validation, lookups and change history.

pub mod expense;

pub use expense::{ExpenseFilter, ExpenseService};
