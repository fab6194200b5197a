//! Expense service
//!
//! Business logic on top of the expense repository: input rules, lookup by
//! ID prefix, filtering, summaries and the change history. The repository itself
//! treats unknown IDs as silent no-ops; this layer turns them into
//! `NotFound` errors for interactive callers.

use chrono::NaiveDate;

use crate::error::{ExpenseError, ExpenseResult};
use crate::history::ExpenseChange;
use crate::models::{Category, Expense, ExpenseId, ExpensePatch, NewExpense};
use crate::reports::ExpenseSummary;
use crate::storage::Storage;

/// Service for expense management
pub struct ExpenseService<'a> {
    storage: &'a Storage,
}

/// Options for filtering expenses
#[derive(Debug, Clone, Default)]
pub struct ExpenseFilter {
    pub category: Option<Category>,
    /// Inclusive lower bound
    pub start_date: Option<NaiveDate>,
    /// Inclusive upper bound
    pub end_date: Option<NaiveDate>,
    /// Maximum number of expenses to return
    pub limit: Option<usize>,
}

impl ExpenseFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn date_range(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.start_date = Some(start);
        self.end_date = Some(end);
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Check whether an expense passes the category and date bounds
    pub fn matches(&self, expense: &Expense) -> bool {
        self.category.map_or(true, |c| expense.category == c)
            && self.start_date.map_or(true, |start| expense.date >= start)
            && self.end_date.map_or(true, |end| expense.date <= end)
    }
}

impl<'a> ExpenseService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Record a new expense
    pub fn create(&self, input: NewExpense) -> ExpenseResult<Expense> {
        let input = input.normalized();
        input
            .validate()
            .map_err(|e| ExpenseError::Validation(e.to_string()))?;

        let expense = self.storage.expenses.add(input)?;

        self.storage
            .history()
            .append(ExpenseChange::added(&expense))?;

        Ok(expense)
    }

    /// Get an expense by its exact ID
    pub fn get(&self, id: &ExpenseId) -> ExpenseResult<Option<Expense>> {
        self.storage.expenses.get(id)
    }

    /// Find an expense by full ID or unique ID prefix
    pub fn find(&self, identifier: &str) -> ExpenseResult<Option<Expense>> {
        let identifier = identifier.trim();
        if identifier.is_empty() {
            return Ok(None);
        }

        let expenses = self.storage.expenses.current()?;

        if let Some(exact) = expenses.iter().find(|e| e.id.as_str() == identifier) {
            return Ok(Some(exact.clone()));
        }

        let mut matches = expenses
            .iter()
            .filter(|e| e.id.as_str().starts_with(identifier));

        match (matches.next(), matches.next()) {
            (None, _) => Ok(None),
            (Some(only), None) => Ok(Some(only.clone())),
            (Some(_), Some(_)) => {
                let count = 2 + matches.count();
                Err(ExpenseError::Validation(format!(
                    "ID prefix '{}' matches {} expenses; use more characters",
                    identifier, count
                )))
            }
        }
    }

    /// Find an expense or fail with `NotFound`
    pub fn require(&self, identifier: &str) -> ExpenseResult<Expense> {
        self.find(identifier)?
            .ok_or_else(|| ExpenseError::expense_not_found(identifier))
    }

    /// List expenses in insertion order
    pub fn list(&self, filter: &ExpenseFilter) -> ExpenseResult<Vec<Expense>> {
        let expenses = self.storage.expenses.current()?;
        let matching = expenses.iter().filter(|e| filter.matches(e)).cloned();

        Ok(match filter.limit {
            Some(limit) => matching.take(limit).collect(),
            None => matching.collect(),
        })
    }

    /// Summarize the expenses passing `filter` (the limit is ignored)
    pub fn summary(&self, filter: &ExpenseFilter) -> ExpenseResult<ExpenseSummary> {
        let expenses = self.storage.expenses.current()?;
        let matching: Vec<Expense> = expenses.iter().filter(|e| filter.matches(e)).cloned().collect();
        ExpenseSummary::compute(&matching)
    }

    /// Overwrite attributes of an existing expense
    pub fn update(&self, id: &ExpenseId, mut patch: ExpensePatch) -> ExpenseResult<Expense> {
        let before = self
            .storage
            .expenses
            .get(id)?
            .ok_or_else(|| ExpenseError::expense_not_found(id.as_str()))?;

        if let Some(title) = patch.title.take() {
            patch.title = Some(title.trim().to_string());
        }

        patch
            .apply(&before)
            .validate()
            .map_err(|e| ExpenseError::Validation(e.to_string()))?;

        let after = self
            .storage
            .expenses
            .update(id, &patch)?
            .ok_or_else(|| ExpenseError::expense_not_found(id.as_str()))?;

        if let Some(change) = ExpenseChange::edited(&before, &after) {
            self.storage.history().append(change)?;
        }

        Ok(after)
    }

    /// Delete an expense
    pub fn delete(&self, id: &ExpenseId) -> ExpenseResult<Expense> {
        let removed = self
            .storage
            .expenses
            .delete(id)?
            .ok_or_else(|| ExpenseError::expense_not_found(id.as_str()))?;

        self.storage
            .history()
            .append(ExpenseChange::removed(&removed))?;

        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::ExpensePaths;
    use crate::models::Money;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = ExpensePaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn input(title: &str, cents: i64, category: Category, day: u32) -> NewExpense {
        NewExpense::new(title, Money::from_cents(cents), date(2024, 3, day), category)
    }

    #[test]
    fn test_create_expense() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);

        let expense = service
            .create(input("  Groceries ", 4250, Category::Food, 1))
            .unwrap();

        assert_eq!(expense.title, "Groceries");
        assert_eq!(expense.amount, Money::from_cents(4250));
        assert_eq!(service.get(&expense.id).unwrap(), Some(expense.clone()));

        let history = storage.history().read_all().unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].change, ExpenseChange::added(&expense));
    }

    #[test]
    fn test_create_rejects_invalid_input() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);

        let err = service.create(input("   ", 100, Category::Food, 1)).unwrap_err();
        assert!(err.is_validation());

        let err = service.create(input("Free", 0, Category::Food, 1)).unwrap_err();
        assert!(err.is_validation());

        assert_eq!(storage.expenses.count().unwrap(), 0);
    }

    #[test]
    fn test_find_by_prefix() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);
        let expense = service.create(input("Taxi", 1800, Category::Travel, 2)).unwrap();

        let found = service.find(expense.id.short()).unwrap();
        assert_eq!(found, Some(expense.clone()));

        let found = service.find(expense.id.as_str()).unwrap();
        assert_eq!(found, Some(expense));

        assert_eq!(service.find("zzzz-not-an-id").unwrap(), None);
        assert_eq!(service.find("").unwrap(), None);
    }

    #[test]
    fn test_find_ambiguous_prefix() {
        let (_temp_dir, storage) = create_test_storage();
        let raw = r#"[
            {"id":"1714557600000","title":"a","amount":1,"date":"2024-05-01","category":"Food"},
            {"id":"1714557600001","title":"b","amount":1,"date":"2024-05-01","category":"Food"}
        ]"#;
        std::fs::write(storage.paths().data_dir().join("expenses.json"), raw).unwrap();
        storage.load_all().unwrap();
        let service = ExpenseService::new(&storage);

        assert!(service.find("17145576").unwrap_err().is_validation());
        assert_eq!(
            service.find("1714557600001").unwrap().map(|e| e.title),
            Some("b".to_string())
        );
        assert!(service.require("999").unwrap_err().is_not_found());
    }

    #[test]
    fn test_list_filters_and_keeps_order() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);
        service.create(input("Lunch", 1000, Category::Food, 5)).unwrap();
        service.create(input("Train", 300, Category::Travel, 1)).unwrap();
        service.create(input("Dinner", 500, Category::Food, 20)).unwrap();

        let all = service.list(&ExpenseFilter::new()).unwrap();
        let titles: Vec<_> = all.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, ["Lunch", "Train", "Dinner"]);

        let food = service
            .list(&ExpenseFilter::new().category(Category::Food))
            .unwrap();
        assert_eq!(food.len(), 2);

        let early = service
            .list(&ExpenseFilter::new().date_range(date(2024, 3, 1), date(2024, 3, 5)))
            .unwrap();
        assert_eq!(early.len(), 2);

        let limited = service.list(&ExpenseFilter::new().limit(1)).unwrap();
        assert_eq!(limited[0].title, "Lunch");
        assert_eq!(limited.len(), 1);
    }

    #[test]
    fn test_summary() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);
        service.create(input("a", 1000, Category::Food, 1)).unwrap();
        service.create(input("b", 500, Category::Food, 2)).unwrap();
        service.create(input("c", 300, Category::Travel, 3)).unwrap();

        let summary = service.summary(&ExpenseFilter::new().limit(1)).unwrap();
        assert_eq!(summary.total, Money::from_cents(1800));
        assert_eq!(summary.amount_for(Category::Food), Some(Money::from_cents(1500)));

        let travel = service
            .summary(&ExpenseFilter::new().category(Category::Travel))
            .unwrap();
        assert_eq!(travel.total, Money::from_cents(300));
        assert_eq!(travel.category_breakdown.len(), 1);
    }

    #[test]
    fn test_update_expense() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);
        let expense = service.create(input("Lunch", 1000, Category::Food, 1)).unwrap();

        let updated = service
            .update(
                &expense.id,
                ExpensePatch::new().title(" Brunch ").amount(Money::from_cents(1500)),
            )
            .unwrap();

        assert_eq!(updated.id, expense.id);
        assert_eq!(updated.title, "Brunch");
        assert_eq!(updated.amount, Money::from_cents(1500));
        assert_eq!(updated.category, Category::Food);

        let history = storage.history().read_all().unwrap();
        match &history[1].change {
            ExpenseChange::Edited { before, changes } => {
                assert_eq!(before, &expense);
                assert_eq!(
                    changes,
                    &ExpensePatch::new().title("Brunch").amount(Money::from_cents(1500))
                );
            }
            other => panic!("unexpected change {:?}", other),
        }
    }

    #[test]
    fn test_update_without_differences_records_nothing() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);
        let expense = service.create(input("Lunch", 1000, Category::Food, 1)).unwrap();

        let updated = service
            .update(&expense.id, ExpensePatch::new().title("Lunch "))
            .unwrap();
        assert_eq!(updated, expense);
        assert_eq!(storage.history().read_all().unwrap().len(), 1);
    }

    #[test]
    fn test_update_validates_merged_value() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);
        let expense = service.create(input("Lunch", 1000, Category::Food, 1)).unwrap();

        let err = service
            .update(&expense.id, ExpensePatch::new().title(""))
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(service.get(&expense.id).unwrap().unwrap().title, "Lunch");
    }

    #[test]
    fn test_update_and_delete_unknown() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);
        let missing = ExpenseId::from("missing");

        assert!(service
            .update(&missing, ExpensePatch::new().title("x"))
            .unwrap_err()
            .is_not_found());
        assert!(service.delete(&missing).unwrap_err().is_not_found());
    }

    #[test]
    fn test_delete_expense() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);
        let expense = service.create(input("Lunch", 1000, Category::Food, 1)).unwrap();

        let removed = service.delete(&expense.id).unwrap();
        assert_eq!(removed, expense);
        assert_eq!(service.get(&expense.id).unwrap(), None);

        let history = storage.history().read_all().unwrap();
        assert_eq!(
            history.last().unwrap().change,
            ExpenseChange::removed(&expense)
        );
    }
}
