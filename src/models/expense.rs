//! Expense model
//!
//! An expense is a single recorded purchase: what it was, how much it cost,
//! when it happened and which category it belongs to.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::category::Category;
use super::ids::ExpenseId;
use super::money::Money;

/// Smallest amount the input rules accept
pub const MIN_AMOUNT: Money = Money::from_cents(1);

/// A recorded expense
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    /// Unique identifier, fixed at creation
    pub id: ExpenseId,

    pub title: String,

    pub amount: Money,

    #[serde(with = "flexible_date")]
    pub date: NaiveDate,

    pub category: Category,
}

impl Expense {
    /// Build an expense from its attributes and a freshly assigned ID
    pub fn from_new(id: ExpenseId, new: NewExpense) -> Self {
        Self {
            id,
            title: new.title,
            amount: new.amount,
            date: new.date,
            category: new.category,
        }
    }

    /// Check the input rules a form would enforce
    pub fn validate(&self) -> Result<(), ExpenseValidationError> {
        validate_fields(&self.title, self.amount)
    }
}

/// Attributes of an expense that has not been assigned an ID yet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewExpense {
    pub title: String,
    pub amount: Money,
    #[serde(with = "flexible_date")]
    pub date: NaiveDate,
    pub category: Category,
}

impl NewExpense {
    pub fn new(
        title: impl Into<String>,
        amount: Money,
        date: NaiveDate,
        category: Category,
    ) -> Self {
        Self {
            title: title.into(),
            amount,
            date,
            category,
        }
    }

    /// Trim the title in place
    pub fn normalized(mut self) -> Self {
        self.title = self.title.trim().to_string();
        self
    }

    pub fn validate(&self) -> Result<(), ExpenseValidationError> {
        validate_fields(&self.title, self.amount)
    }
}

/// A partial set of attributes to overwrite on an existing expense
///
/// Serialized with absent fields omitted, which is how the change history
/// stores an edit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExpensePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
}

impl ExpensePatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn amount(mut self, amount: Money) -> Self {
        self.amount = Some(amount);
        self
    }

    pub fn date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    /// True when the patch would not change anything
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.amount.is_none() && self.date.is_none() && self.category.is_none()
    }

    /// The attributes of `after` that differ from `before`
    ///
    /// Applying the result to `before` yields `after` (IDs aside).
    pub fn between(before: &Expense, after: &Expense) -> Self {
        Self {
            title: (after.title != before.title).then(|| after.title.clone()),
            amount: (after.amount != before.amount).then_some(after.amount),
            date: (after.date != before.date).then_some(after.date),
            category: (after.category != before.category).then_some(after.category),
        }
    }

    /// Merge the patch over an existing expense
    ///
    /// The ID and any attribute absent from the patch are carried over.
    pub fn apply(&self, existing: &Expense) -> Expense {
        Expense {
            id: existing.id.clone(),
            title: self.title.clone().unwrap_or_else(|| existing.title.clone()),
            amount: self.amount.unwrap_or(existing.amount),
            date: self.date.unwrap_or(existing.date),
            category: self.category.unwrap_or(existing.category),
        }
    }
}

fn validate_fields(title: &str, amount: Money) -> Result<(), ExpenseValidationError> {
    if title.trim().is_empty() {
        return Err(ExpenseValidationError::EmptyTitle);
    }
    if amount < MIN_AMOUNT {
        return Err(ExpenseValidationError::AmountTooSmall(amount));
    }
    Ok(())
}

/// Validation errors for expenses
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpenseValidationError {
    EmptyTitle,
    AmountTooSmall(Money),
}

impl fmt::Display for ExpenseValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "Title is required"),
            Self::AmountTooSmall(amount) => {
                write!(f, "Amount must be at least {} (got {})", MIN_AMOUNT, amount)
            }
        }
    }
}

impl std::error::Error for ExpenseValidationError {}

/// Serde adapter for expense dates
///
/// Writes `YYYY-MM-DD`. Reads that form, RFC 3339 timestamps, naive
/// date-times, and numeric millisecond epoch timestamps. Timestamps are
/// reduced to their UTC calendar date.
pub mod flexible_date {
    use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
    use serde::de::{self, Visitor};
    use serde::{Deserializer, Serializer};
    use std::fmt;

    const DATE_FORMAT: &str = "%Y-%m-%d";

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&date.format(DATE_FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        deserializer.deserialize_any(DateVisitor)
    }

    /// Parse a date from any of the accepted textual forms
    pub fn parse_text(s: &str) -> Option<NaiveDate> {
        let s = s.trim();
        if let Ok(date) = NaiveDate::parse_from_str(s, DATE_FORMAT) {
            return Some(date);
        }
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Some(dt.with_timezone(&Utc).date_naive());
        }
        ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
            .map(|dt| dt.date())
    }

    pub fn from_millis(millis: i64) -> Option<NaiveDate> {
        DateTime::<Utc>::from_timestamp_millis(millis).map(|dt| dt.date_naive())
    }

    struct DateVisitor;

    impl<'de> Visitor<'de> for DateVisitor {
        type Value = NaiveDate;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a date string or a millisecond timestamp")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<NaiveDate, E> {
            parse_text(v).ok_or_else(|| E::custom(format!("unrecognized date '{}'", v)))
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<NaiveDate, E> {
            from_millis(v).ok_or_else(|| E::custom(format!("timestamp {} out of range", v)))
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<NaiveDate, E> {
            let millis = i64::try_from(v)
                .map_err(|_| E::custom(format!("timestamp {} out of range", v)))?;
            self.visit_i64(millis)
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<NaiveDate, E> {
            if !v.is_finite() {
                return Err(E::custom("timestamp must be finite"));
            }
            self.visit_i64(v.trunc() as i64)
        }
    }
}
