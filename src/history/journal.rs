//! Append-only change log file

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::{ExpenseError, ExpenseResult};
use crate::storage::file_io::read_text;

use super::change::{ChangeRecord, ExpenseChange};

/// One JSON [`ChangeRecord`] per line, oldest first
#[derive(Debug, Clone)]
pub struct HistoryLog {
    path: PathBuf,
}

impl HistoryLog {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stamp `change` with the current time and append it
    pub fn append(&self, change: ExpenseChange) -> ExpenseResult<ChangeRecord> {
        let record = ChangeRecord::now(change);
        let line = serde_json::to_string(&record)?;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| ExpenseError::Io(format!("Failed to open history log: {}", e)))?;
        writeln!(file, "{}", line)
            .map_err(|e| ExpenseError::Io(format!("Failed to write history log: {}", e)))?;

        debug!(kind = record.change.verb(), id = %record.change.expense_id(), "recorded change");
        Ok(record)
    }

    /// Every readable record; unreadable lines are skipped with a warning
    pub fn read_all(&self) -> ExpenseResult<Vec<ChangeRecord>> {
        let Some(contents) = read_text(&self.path)? else {
            return Ok(Vec::new());
        };

        let records = contents
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .filter_map(|(idx, line)| match serde_json::from_str(line) {
                Ok(record) => Some(record),
                Err(e) => {
                    warn!(line = idx + 1, error = %e, "skipping unreadable history entry");
                    None
                }
            })
            .collect();

        Ok(records)
    }

    /// The last `count` records touching expenses whose ID starts with
    /// `id_prefix` (all expenses when `None`), oldest first
    pub fn recent(
        &self,
        count: usize,
        id_prefix: Option<&str>,
    ) -> ExpenseResult<Vec<ChangeRecord>> {
        let mut records: Vec<ChangeRecord> = self
            .read_all()?
            .into_iter()
            .filter(|r| {
                id_prefix.map_or(true, |prefix| r.change.expense_id().as_str().starts_with(prefix))
            })
            .collect();

        let start = records.len().saturating_sub(count);
        Ok(records.split_off(start))
    }
}
