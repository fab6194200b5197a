//! Expense categories
//!
//! The category set is closed: every expense is filed under one of four
//! fixed buckets.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Category an expense is filed under
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub enum Category {
    #[default]
    Food,
    Travel,
    Bills,
    Others,
}

impl Category {
    /// All categories in declaration order
    pub const ALL: [Category; 4] = [
        Category::Food,
        Category::Travel,
        Category::Bills,
        Category::Others,
    ];

    /// Name as stored in persisted data
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Food => "Food",
            Self::Travel => "Travel",
            Self::Bills => "Bills",
            Self::Others => "Others",
        }
    }

    /// Icon shown next to the category name
    pub fn icon(&self) -> &'static str {
        match self {
            Self::Food => "🍕",
            Self::Travel => "✈️",
            Self::Bills => "💡",
            Self::Others => "📦",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a category name is not recognized
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCategory(pub String);

impl fmt::Display for UnknownCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Unknown category '{}' (expected one of: Food, Travel, Bills, Others)",
            self.0
        )
    }
}

impl std::error::Error for UnknownCategory {}

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownCategory(wanted.to_string()))
    }
}
