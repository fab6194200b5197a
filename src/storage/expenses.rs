//! Expense repository
//!
//! Owns the in-memory expense collection and mirrors it into the `expenses`
//! storage slot. The collection is insertion-ordered. Every mutation builds
//! a new collection value and swaps it in, so a snapshot handed out by
//! [`ExpenseRepository::current`] never changes underneath its holder and
//! `Arc::ptr_eq` tells observers whether anything happened.
//!
//! After every mutator call (including ones that matched nothing) the whole
//! collection is serialized and written back to the slot.

use std::sync::{Arc, RwLock, RwLockWriteGuard};

use tracing::{debug, info, warn};

use crate::error::ExpenseError;
use crate::models::{Expense, ExpenseId, ExpensePatch, NewExpense};

use super::kv::KeyValueStore;

/// Storage slot holding the serialized collection
pub const EXPENSES_KEY: &str = "expenses";

/// Slot receiving an unreadable collection before it is replaced
pub const CORRUPT_BACKUP_KEY: &str = "expenses.corrupt";

/// Immutable view of the collection at one point in time
pub type Snapshot = Arc<Vec<Expense>>;

/// What `load` found in storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Nothing stored yet
    Missing,
    /// Stored collection decoded successfully
    Loaded { count: usize },
    /// Stored value was unreadable; it was copied aside and the collection
    /// starts empty
    Recovered { reason: String },
}

/// Repository for expense persistence
pub struct ExpenseRepository {
    store: Box<dyn KeyValueStore>,
    data: RwLock<Snapshot>,
}

impl ExpenseRepository {
    /// Create a repository over a key-value store; call `load` before use
    pub fn new(store: Box<dyn KeyValueStore>) -> Self {
        Self {
            store,
            data: RwLock::new(Arc::new(Vec::new())),
        }
    }

    /// Load the collection from storage
    ///
    /// A missing or blank slot yields an empty collection. An unreadable one
    /// is logged, preserved under [`CORRUPT_BACKUP_KEY`], and replaced by an
    /// empty collection. Only failures to reach the store are errors.
    pub fn load(&self) -> Result<LoadOutcome, ExpenseError> {
        let raw = self.store.get(EXPENSES_KEY)?;

        let (expenses, outcome) = match raw {
            Some(raw) if !raw.trim().is_empty() => match decode(&raw) {
                Ok(expenses) => {
                    let count = expenses.len();
                    (expenses, LoadOutcome::Loaded { count })
                }
                Err(err) => {
                    warn!(error = %err, "stored expenses are unreadable, starting empty");
                    self.store.set(CORRUPT_BACKUP_KEY, &raw)?;
                    (
                        Vec::new(),
                        LoadOutcome::Recovered {
                            reason: err.to_string(),
                        },
                    )
                }
            },
            _ => (Vec::new(), LoadOutcome::Missing),
        };

        debug!(count = expenses.len(), "loaded expenses");
        *self.write_lock()? = Arc::new(expenses);
        Ok(outcome)
    }

    /// Current collection snapshot
    pub fn current(&self) -> Result<Snapshot, ExpenseError> {
        let data = self.data.read().map_err(|e| {
            ExpenseError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;
        Ok(Arc::clone(&data))
    }

    /// Get an expense by ID
    pub fn get(&self, id: &ExpenseId) -> Result<Option<Expense>, ExpenseError> {
        Ok(self.current()?.iter().find(|e| &e.id == id).cloned())
    }

    pub fn count(&self) -> Result<usize, ExpenseError> {
        Ok(self.current()?.len())
    }

    /// Append a new expense under a freshly generated ID
    pub fn add(&self, new: NewExpense) -> Result<Expense, ExpenseError> {
        let mut data = self.write_lock()?;

        let mut id = ExpenseId::new();
        while data.iter().any(|e| e.id == id) {
            id = ExpenseId::new();
        }

        let expense = Expense::from_new(id, new);
        let mut next = Vec::with_capacity(data.len() + 1);
        next.extend(data.iter().cloned());
        next.push(expense.clone());

        self.commit(&mut data, next)?;
        info!(id = %expense.id, title = %expense.title, "added expense");
        Ok(expense)
    }

    /// Overwrite attributes of the expense with `id`
    ///
    /// Position and identity are kept. Returns the merged value, or `None`
    /// if no expense has that ID, in which case the collection is untouched.
    pub fn update(
        &self,
        id: &ExpenseId,
        patch: &ExpensePatch,
    ) -> Result<Option<Expense>, ExpenseError> {
        let mut data = self.write_lock()?;

        let mut updated = None;
        let mut next = Vec::with_capacity(data.len());
        for expense in data.iter() {
            if &expense.id == id {
                let merged = patch.apply(expense);
                updated.get_or_insert_with(|| merged.clone());
                next.push(merged);
            } else {
                next.push(expense.clone());
            }
        }

        if updated.is_none() {
            debug!(id = %id, "update matched no expense");
            self.persist(&data)?;
            return Ok(None);
        }

        self.commit(&mut data, next)?;
        info!(id = %id, "updated expense");
        Ok(updated)
    }

    /// Remove the expense with `id`
    ///
    /// Returns the removed value, or `None` if no expense has that ID.
    pub fn delete(&self, id: &ExpenseId) -> Result<Option<Expense>, ExpenseError> {
        let mut data = self.write_lock()?;

        let removed = data.iter().find(|e| &e.id == id).cloned();
        if removed.is_none() {
            debug!(id = %id, "delete matched no expense");
            self.persist(&data)?;
            return Ok(None);
        }

        let next: Vec<Expense> = data.iter().filter(|e| &e.id != id).cloned().collect();
        self.commit(&mut data, next)?;
        info!(id = %id, "deleted expense");
        Ok(removed)
    }

    /// Persist `next` and, once it is durable, make it the current value
    fn commit(&self, data: &mut Snapshot, next: Vec<Expense>) -> Result<(), ExpenseError> {
        self.persist(&next)?;
        *data = Arc::new(next);
        Ok(())
    }

    fn persist(&self, expenses: &[Expense]) -> Result<(), ExpenseError> {
        let raw = serde_json::to_string(expenses)?;
        self.store.set(EXPENSES_KEY, &raw)?;
        debug!(count = expenses.len(), bytes = raw.len(), "persisted expenses");
        Ok(())
    }

    fn write_lock(&self) -> Result<RwLockWriteGuard<'_, Snapshot>, ExpenseError> {
        self.data
            .write()
            .map_err(|e| ExpenseError::Storage(format!("Failed to acquire write lock: {}", e)))
    }
}

fn decode(raw: &str) -> Result<Vec<Expense>, ExpenseError> {
    serde_json::from_str(raw).map_err(|e| ExpenseError::StorageCorrupt {
        key: EXPENSES_KEY.to_string(),
        reason: e.to_string(),
    })
}
