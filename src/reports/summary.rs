//! Expense summary
//!
//! Totals and per-category subtotals derived from a list of expenses. The
//! summary is a pure function of its input and is recomputed whenever it is
//! asked for; nothing here is cached or stored.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Category, Expense, Money};

/// Width of the bar drawn for a 100% share
const BAR_WIDTH: usize = 30;

/// Totals derived from an expense list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExpenseSummary {
    /// Sum of all amounts
    pub total: Money,
    /// Sum per category; only categories that occur are present
    pub category_breakdown: BTreeMap<Category, Money>,
    /// Number of expenses summarized
    pub count: usize,
}

/// One category's slice of the total
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryShare {
    pub category: Category,
    pub amount: Money,
    /// Rounded whole percent of the total (0 when the total is 0)
    pub percentage: i64,
}

impl ExpenseSummary {
    /// Summarize a list of expenses
    ///
    /// Fails with [`ExpenseError::Overflow`] if the total does not fit in
    /// [`Money`].
    pub fn compute(expenses: &[Expense]) -> ExpenseResult<Self> {
        let mut category_breakdown: BTreeMap<Category, Money> = BTreeMap::new();
        let mut total = Money::zero();

        for expense in expenses {
            total = total
                .checked_add(expense.amount)
                .ok_or_else(|| overflow(expenses.len()))?;

            let subtotal = category_breakdown.entry(expense.category).or_default();
            *subtotal = subtotal
                .checked_add(expense.amount)
                .ok_or_else(|| overflow(expenses.len()))?;
        }

        Ok(Self {
            total,
            category_breakdown,
            count: expenses.len(),
        })
    }

    /// Mean amount per expense, zero for an empty list
    pub fn average(&self) -> Money {
        if self.count == 0 {
            return Money::zero();
        }
        Money::from_cents((self.total.cents() as f64 / self.count as f64).round() as i64)
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Subtotal for one category, if it occurs
    pub fn amount_for(&self, category: Category) -> Option<Money> {
        self.category_breakdown.get(&category).copied()
    }

    /// Categories ordered by descending amount, with their share of the total
    pub fn ranked(&self) -> Vec<CategoryShare> {
        let mut shares: Vec<CategoryShare> = self
            .category_breakdown
            .iter()
            .map(|(&category, &amount)| CategoryShare {
                category,
                amount,
                percentage: percentage_of(amount, self.total),
            })
            .collect();

        // Stable sort keeps category order for equal amounts
        shares.sort_by(|a, b| b.amount.cmp(&a.amount));
        shares
    }

    /// Format the dashboard for terminal display
    pub fn format_terminal(&self, currency_symbol: &str) -> String {
        let mut output = String::new();

        output.push_str("Expense Summary\n");
        output.push_str(&"=".repeat(60));
        output.push('\n');
        output.push_str(&format!(
            "Total Expenses:          {}\n",
            self.total.format_with_symbol(currency_symbol)
        ));
        output.push_str(&format!("Total Transactions:      {}\n", self.count));
        output.push_str(&format!(
            "Average per Transaction: {}\n",
            self.average().format_with_symbol(currency_symbol)
        ));

        if self.is_empty() {
            output.push_str("\nNo expenses recorded yet.\n");
            return output;
        }

        output.push_str("\nCategory Breakdown\n");
        output.push_str(&"-".repeat(60));
        output.push('\n');

        for share in self.ranked() {
            let filled = (share.percentage.clamp(0, 100) as usize * BAR_WIDTH) / 100;
            output.push_str(&format!(
                "{} {:<8} {:>12} {:>4}% {}\n",
                share.category.icon(),
                share.category.as_str(),
                share.amount.format_with_symbol(currency_symbol),
                share.percentage,
                "█".repeat(filled)
            ));
        }

        output
    }
}

fn overflow(count: usize) -> ExpenseError {
    ExpenseError::Overflow(format!("total of {} expenses is out of range", count))
}

/// Whole-percent share of `amount` in `total`, rounded half up
///
/// A zero total yields 0 rather than dividing by zero.
pub fn percentage_of(amount: Money, total: Money) -> i64 {
    if total.is_zero() {
        return 0;
    }
    let ratio = amount.cents() as f64 / total.cents() as f64 * 100.0;
    (ratio + 0.5).floor() as i64
}
