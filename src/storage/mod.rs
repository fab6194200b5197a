//! Storage layer for the expense tracker
//!
//! Provides key-value slot storage with atomic file writes, the expense
//! repository on top of it, and the coordinator that wires it and the
//! change history to the configured paths.

pub mod expenses;
pub mod file_io;
pub mod kv;

pub use expenses::{ExpenseRepository, LoadOutcome, Snapshot, EXPENSES_KEY};
pub use kv::{FileStore, KeyValueStore, MemoryStore};

use crate::config::paths::ExpensePaths;
use crate::error::ExpenseError;
use crate::history::HistoryLog;

/// Main storage coordinator
///
/// Constructed once by whichever entry point owns the process and passed
/// down by reference.
pub struct Storage {
    paths: ExpensePaths,
    pub expenses: ExpenseRepository,
    history: HistoryLog,
}

impl Storage {
    /// Create a new Storage instance backed by files under `paths`
    pub fn new(paths: ExpensePaths) -> Result<Self, ExpenseError> {
        paths.ensure_directories()?;

        Ok(Self {
            expenses: ExpenseRepository::new(Box::new(FileStore::new(paths.data_dir()))),
            history: HistoryLog::new(paths.history_log()),
            paths,
        })
    }

    /// Create a Storage instance with a custom expense store
    pub fn with_store(paths: ExpensePaths, store: Box<dyn KeyValueStore>) -> Self {
        Self {
            expenses: ExpenseRepository::new(store),
            history: HistoryLog::new(paths.history_log()),
            paths,
        }
    }

    pub fn paths(&self) -> &ExpensePaths {
        &self.paths
    }

    pub fn history(&self) -> &HistoryLog {
        &self.history
    }

    /// Load all data from disk
    pub fn load_all(&self) -> Result<LoadOutcome, ExpenseError> {
        self.expenses.load()
    }
}
