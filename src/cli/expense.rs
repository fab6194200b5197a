//! Expense CLI commands
//!
//! The everyday commands: record, list, inspect, edit and delete expenses,
//! and show the summary dashboard.

use chrono::{Local, NaiveDate};
use clap::Subcommand;

use crate::config::Settings;
use crate::display::{format_expense_details, format_expense_table};
use crate::error::ExpenseResult;
use crate::models::{Category, ExpensePatch, Money, NewExpense};
use crate::services::ExpenseService;
use crate::storage::Storage;

use super::FilterArgs;

/// Expense subcommands
#[derive(Subcommand, Debug)]
pub enum ExpenseCommands {
    /// Record a new expense
    Add {
        /// What the money was spent on
        title: String,
        /// Amount (e.g., "12.50" or "$12.50")
        amount: Money,
        /// Category: Food, Travel, Bills or Others (default from settings)
        #[arg(short, long)]
        category: Option<Category>,
        /// Date of the expense (YYYY-MM-DD, default today)
        #[arg(short, long)]
        date: Option<NaiveDate>,
    },

    /// List expenses in the order they were recorded
    #[command(alias = "ls")]
    List {
        #[command(flatten)]
        filter: FilterArgs,
        /// Maximum number of expenses to show
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Show expense details
    Show {
        /// Expense ID or unique ID prefix
        id: String,
    },

    /// Edit an expense
    Edit {
        /// Expense ID or unique ID prefix
        id: String,
        /// New title
        #[arg(short, long)]
        title: Option<String>,
        /// New amount
        #[arg(short, long)]
        amount: Option<Money>,
        /// New category
        #[arg(short, long)]
        category: Option<Category>,
        /// New date (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<NaiveDate>,
    },

    /// Delete an expense
    #[command(alias = "rm")]
    Delete {
        /// Expense ID or unique ID prefix
        id: String,
    },

    /// Show totals and the category breakdown
    Summary {
        #[command(flatten)]
        filter: FilterArgs,
        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Handle an expense command
pub fn handle_expense_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ExpenseCommands,
) -> ExpenseResult<()> {
    let service = ExpenseService::new(storage);

    match cmd {
        ExpenseCommands::Add {
            title,
            amount,
            category,
            date,
        } => {
            let input = NewExpense::new(
                title,
                amount,
                date.unwrap_or_else(|| Local::now().date_naive()),
                category.unwrap_or(settings.default_category),
            );
            let expense = service.create(input)?;

            println!("Added expense: {}", expense.title);
            println!(
                "  Amount:   {}",
                expense.amount.format_with_symbol(&settings.currency_symbol)
            );
            println!("  Category: {} {}", expense.category.icon(), expense.category);
            println!("  Date:     {}", expense.date.format(&settings.date_format));
            println!("  ID:       {}", expense.id);
        }

        ExpenseCommands::List { filter, limit } => {
            let mut filter = filter.to_filter();
            filter.limit = limit;
            let expenses = service.list(&filter)?;
            print!("{}", format_expense_table(&expenses, settings)?);
        }

        ExpenseCommands::Show { id } => {
            let expense = service.require(&id)?;
            print!("{}", format_expense_details(&expense, settings));
        }

        ExpenseCommands::Edit {
            id,
            title,
            amount,
            category,
            date,
        } => {
            let expense = service.require(&id)?;

            let patch = ExpensePatch {
                title,
                amount,
                date,
                category,
            };

            if patch.is_empty() {
                println!("No changes specified. Use --title, --amount, --category or --date.");
                return Ok(());
            }

            let updated = service.update(&expense.id, patch)?;
            println!("Updated expense: {}", updated.title);
        }

        ExpenseCommands::Delete { id } => {
            let expense = service.require(&id)?;
            let removed = service.delete(&expense.id)?;
            println!(
                "Deleted expense: {} ({})",
                removed.title,
                removed.amount.format_with_symbol(&settings.currency_symbol)
            );
        }

        ExpenseCommands::Summary { filter, json } => {
            let summary = service.summary(&filter.to_filter())?;

            if json {
                let view = serde_json::json!({
                    "total": summary.total,
                    "count": summary.count,
                    "average": summary.average(),
                    "category_breakdown": summary.category_breakdown,
                    "ranked": summary.ranked(),
                });
                println!("{}", serde_json::to_string_pretty(&view)?);
            } else {
                print!("{}", summary.format_terminal(&settings.currency_symbol));
            }
        }
    }

    Ok(())
}
