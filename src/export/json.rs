//! JSON Export functionality
//!
//! Exports expenses together with their summary, under a schema version.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use std::io::Write;

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::Expense;
use crate::reports::ExpenseSummary;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Full export document
#[derive(Debug, Clone, Serialize)]
pub struct ExpenseExport {
    pub schema_version: String,
    pub exported_at: DateTime<Utc>,
    /// Application version that created the export
    pub app_version: String,
    pub expenses: Vec<Expense>,
    pub summary: ExpenseSummary,
    pub metadata: ExportMetadata,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExportMetadata {
    pub expense_count: usize,
    pub earliest_expense: Option<NaiveDate>,
    pub latest_expense: Option<NaiveDate>,
}

impl ExpenseExport {
    pub fn new(expenses: &[Expense]) -> ExpenseResult<Self> {
        Ok(Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            expenses: expenses.to_vec(),
            summary: ExpenseSummary::compute(expenses)?,
            metadata: ExportMetadata {
                expense_count: expenses.len(),
                earliest_expense: expenses.iter().map(|e| e.date).min(),
                latest_expense: expenses.iter().map(|e| e.date).max(),
            },
        })
    }
}

/// Write the export document as JSON
pub fn export_json<W: Write>(expenses: &[Expense], writer: W, pretty: bool) -> ExpenseResult<()> {
    let export = ExpenseExport::new(expenses)?;

    let result = if pretty {
        serde_json::to_writer_pretty(writer, &export)
    } else {
        serde_json::to_writer(writer, &export)
    };

    result.map_err(|e| ExpenseError::Export(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, ExpenseId, Money, NewExpense};

    fn expense(title: &str, day: u32, cents: i64) -> Expense {
        Expense::from_new(
            ExpenseId::new(),
            NewExpense::new(
                title,
                Money::from_cents(cents),
                NaiveDate::from_ymd_opt(2024, 6, day).unwrap(),
                Category::Bills,
            ),
        )
    }

    #[test]
    fn test_export_document() {
        let expenses = [expense("Power", 10, 8025), expense("Water", 3, 1975)];
        let mut buf = Vec::new();
        export_json(&expenses, &mut buf, false).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value["schema_version"], EXPORT_SCHEMA_VERSION);
        assert_eq!(value["expenses"].as_array().unwrap().len(), 2);
        assert_eq!(value["expenses"][0]["title"], "Power");
        assert_eq!(value["summary"]["total"], serde_json::json!(100.0));
        assert_eq!(value["metadata"]["earliest_expense"], "2024-06-03");
        assert_eq!(value["metadata"]["latest_expense"], "2024-06-10");
    }

    #[test]
    fn test_export_empty() {
        let mut buf = Vec::new();
        export_json(&[], &mut buf, true).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value["metadata"]["expense_count"], 0);
        assert!(value["metadata"]["earliest_expense"].is_null());
    }
}
