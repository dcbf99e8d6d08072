//! Per-year table representation.

use std::collections::HashSet;

/// One year's source file after header normalization: a normalized column
/// list and string-valued rows in source order.
#[derive(Debug, Clone)]
pub struct YearTable {
    pub year: i32,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl YearTable {
    /// Index of a normalized column name, if this year carries it.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// The column set, for cross-year intersection.
    pub fn column_set(&self) -> HashSet<&str> {
        self.columns.iter().map(String::as_str).collect()
    }
}
