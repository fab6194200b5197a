//! Expense display formatting
//!
//! Renders the expense list as a table and single expenses as a details
//! block.

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

use crate::config::Settings;
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Expense, Money};

#[derive(Tabled)]
struct ExpenseRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Date")]
    date: String,
}

impl ExpenseRow {
    fn new(expense: &Expense, settings: &Settings) -> Self {
        Self {
            id: expense.id.short().to_string(),
            title: truncate(&expense.title, 32),
            amount: expense.amount.format_with_symbol(&settings.currency_symbol),
            category: format_category(expense),
            date: expense.date.format(&settings.date_format).to_string(),
        }
    }
}

/// Format a list of expenses as a table with a total line
pub fn format_expense_table(
    expenses: &[Expense],
    settings: &Settings,
) -> ExpenseResult<String> {
    if expenses.is_empty() {
        return Ok("No expenses found.\n".to_string());
    }

    let mut table = Table::new(expenses.iter().map(|e| ExpenseRow::new(e, settings)));
    table
        .with(Style::rounded())
        .with(Modify::new(Columns::single(2)).with(Alignment::right()));

    let total = Money::checked_sum(expenses.iter().map(|e| e.amount)).ok_or_else(|| {
        ExpenseError::Overflow(format!("total of {} expenses is out of range", expenses.len()))
    })?;
    let noun = if expenses.len() == 1 { "expense" } else { "expenses" };

    Ok(format!(
        "{}\n{} {}, total {}\n",
        table,
        expenses.len(),
        noun,
        total.format_with_symbol(&settings.currency_symbol)
    ))
}

/// Format expense details for display
pub fn format_expense_details(expense: &Expense, settings: &Settings) -> String {
    let mut output = String::new();

    output.push_str(&format!("Expense:  {}\n", expense.id));
    output.push_str(&format!("Title:    {}\n", expense.title));
    output.push_str(&format!(
        "Amount:   {}\n",
        expense.amount.format_with_symbol(&settings.currency_symbol)
    ));
    output.push_str(&format!("Category: {}\n", format_category(expense)));
    output.push_str(&format!(
        "Date:     {}\n",
        expense.date.format(&settings.date_format)
    ));

    output
}

fn format_category(expense: &Expense) -> String {
    format!("{} {}", expense.category.icon(), expense.category)
}

/// Truncate a string to a maximum number of characters
fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", head)
    }
}
