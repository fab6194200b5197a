//! Typed change records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Expense, ExpenseId, ExpensePatch};

/// One mutation of the expense collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExpenseChange {
    Added { expense: Expense },
    Edited { before: Expense, changes: ExpensePatch },
    Removed { expense: Expense },
}

impl ExpenseChange {
    pub fn added(expense: &Expense) -> Self {
        Self::Added {
            expense: expense.clone(),
        }
    }

    /// An edit from `before` to `after`, or `None` if nothing differs
    pub fn edited(before: &Expense, after: &Expense) -> Option<Self> {
        let changes = ExpensePatch::between(before, after);
        if changes.is_empty() {
            return None;
        }
        Some(Self::Edited {
            before: before.clone(),
            changes,
        })
    }

    pub fn removed(expense: &Expense) -> Self {
        Self::Removed {
            expense: expense.clone(),
        }
    }

    /// The expense this change applies to
    pub fn expense_id(&self) -> &ExpenseId {
        match self {
            Self::Added { expense } | Self::Removed { expense } => &expense.id,
            Self::Edited { before, .. } => &before.id,
        }
    }

    /// The expense as it looked once the change was made, if it still exists
    pub fn result(&self) -> Option<Expense> {
        match self {
            Self::Added { expense } => Some(expense.clone()),
            Self::Edited { before, changes } => Some(changes.apply(before)),
            Self::Removed { .. } => None,
        }
    }

    pub fn verb(&self) -> &'static str {
        match self {
            Self::Added { .. } => "added",
            Self::Edited { .. } => "edited",
            Self::Removed { .. } => "removed",
        }
    }
}

/// A change with the time it was recorded
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeRecord {
    pub at: DateTime<Utc>,
    #[serde(flatten)]
    pub change: ExpenseChange,
}

impl ChangeRecord {
    pub fn now(change: ExpenseChange) -> Self {
        Self {
            at: Utc::now(),
            change,
        }
    }
}
