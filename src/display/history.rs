//! Change history formatting

use crate::config::Settings;
use crate::history::{ChangeRecord, ExpenseChange};
use crate::models::{Expense, ExpensePatch, Money};

/// Format one history record as a single line (two for edits)
pub fn format_change(record: &ChangeRecord, settings: &Settings) -> String {
    let stamp = record.at.format("%Y-%m-%d %H:%M:%S UTC");
    let id = record.change.expense_id().short();

    match &record.change {
        ExpenseChange::Added { expense } | ExpenseChange::Removed { expense } => format!(
            "[{}] {:<7} {} {}",
            stamp,
            record.change.verb(),
            id,
            describe(expense, settings)
        ),
        ExpenseChange::Edited { before, changes } => {
            let title = changes.title.as_deref().unwrap_or(&before.title);
            format!(
                "[{}] {:<7} {} {}\n  {}",
                stamp,
                record.change.verb(),
                id,
                title,
                describe_changes(before, changes, settings).join(", ")
            )
        }
    }
}

fn describe(expense: &Expense, settings: &Settings) -> String {
    format!(
        "{} ({}, {}, {})",
        expense.title,
        expense.amount.format_with_symbol(&settings.currency_symbol),
        expense.category,
        expense.date.format(&settings.date_format)
    )
}

fn describe_changes(before: &Expense, changes: &ExpensePatch, settings: &Settings) -> Vec<String> {
    let money = |m: Money| m.format_with_symbol(&settings.currency_symbol);
    let mut parts = Vec::new();

    if let Some(title) = &changes.title {
        parts.push(format!("title \"{}\" -> \"{}\"", before.title, title));
    }
    if let Some(amount) = changes.amount {
        parts.push(format!("amount {} -> {}", money(before.amount), money(amount)));
    }
    if let Some(date) = changes.date {
        parts.push(format!(
            "date {} -> {}",
            before.date.format(&settings.date_format),
            date.format(&settings.date_format)
        ));
    }
    if let Some(category) = changes.category {
        parts.push(format!("category {} -> {}", before.category, category));
    }

    parts
}
