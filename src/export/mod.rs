//! Export module
//!
//! Provides expense export in multiple formats:
//! - CSV: one row per expense (spreadsheet-compatible)
//! - JSON: expenses plus summary, machine-readable
//! - YAML: the same document, human-readable

pub mod csv;
pub mod json;
pub mod yaml;

pub use self::csv::export_csv;
pub use self::json::{export_json, ExpenseExport, EXPORT_SCHEMA_VERSION};
pub use self::yaml::export_yaml;
