//! Row and Value types for flatdb
//!
//! This module defines how stored field values are represented in memory.
//! Values are opaque text; numeric interpretation happens lazily at
//! comparison time and never changes what is stored.

use serde::Serialize;
use std::fmt;

/// A single stored field value
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Value(String);

impl Value {
    /// Create a value from raw stored text
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// The raw stored text
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Try to interpret the value as a number
    pub fn as_f64(&self) -> Option<f64> {
        self.0.trim().parse::<f64>().ok()
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::new(s)
    }
}

/// A table row: an ordered sequence of field values
///
/// Rows may be shorter than the table schema because INSERT never enforces
/// a column-count match, so indexed access is always fallible.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct Row(Vec<Value>);

impl Row {
    /// Create a row from a list of values
    pub fn new(values: Vec<Value>) -> Self {
        Self(values)
    }

    /// Parse a row from a stored line (comma-separated fields, no escaping)
    pub fn from_line(line: &str) -> Self {
        Self(line.split(',').map(Value::from).collect())
    }

    /// Render the row as a stored line
    pub fn to_line(&self) -> String {
        self.0
            .iter()
            .map(Value::as_str)
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Get a field by index
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.0.get(index)
    }

    /// All fields in order
    pub fn values(&self) -> &[Value] {
        &self.0
    }

    /// Number of fields in this row
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check whether the row has no fields
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<&str>> for Row {
    fn from(fields: Vec<&str>) -> Self {
        Self(fields.into_iter().map(Value::from).collect())
    }
}
