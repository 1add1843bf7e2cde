//! Schema definitions for flatdb
//!
//! A table schema is the ordered list of column cells from the table's
//! header line. A cell is the full text of one column definition, so
//! `CREATE TABLE t (id INT, name)` yields the cells `id INT` and `name`.
//! Lookup is case-insensitive on the whole cell text but the original
//! casing is preserved for display.

use std::collections::HashMap;

/// Table schema - the ordered column cells of a table
#[derive(Debug, Clone, Default)]
pub struct Schema {
    /// Ordered column cells, original case
    columns: Vec<String>,
    /// Lowercased cell text to index mapping (first occurrence wins)
    name_to_index: HashMap<String, usize>,
}

impl Schema {
    /// Create a schema from a list of column cells
    pub fn from_columns(columns: Vec<String>) -> Self {
        let mut name_to_index = HashMap::new();
        for (idx, cell) in columns.iter().enumerate() {
            name_to_index.entry(cell.to_lowercase()).or_insert(idx);
        }
        Self {
            columns,
            name_to_index,
        }
    }

    /// Parse a schema from a stored header line (comma-separated cells)
    pub fn from_header(line: &str) -> Self {
        Self::from_columns(line.split(',').map(|s| s.to_string()).collect())
    }

    /// Render the schema as a header line
    pub fn header_line(&self) -> String {
        self.columns.join(",")
    }

    /// Get a column index by name (case-insensitive)
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.name_to_index.get(&name.to_lowercase()).copied()
    }

    /// Get a column cell by index, original case
    pub fn column_at(&self, index: usize) -> Option<&str> {
        self.columns.get(index).map(|s| s.as_str())
    }

    /// All column cells in order, original case
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Number of columns
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Check whether the schema has no columns
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_round_trip() {
        let schema = Schema::from_header("Id,Name,city");
        assert_eq!(schema.len(), 3);
        assert_eq!(schema.header_line(), "Id,Name,city");
        assert_eq!(schema.column_at(1), Some("Name"));
    }

    #[test]
    fn test_case_insensitive_lookup() {
        let schema = Schema::from_header("Id,Name");
        assert_eq!(schema.column_index("id"), Some(0));
        assert_eq!(schema.column_index("NAME"), Some(1));
        assert_eq!(schema.column_index("missing"), None);
        // Display keeps the stored casing.
        assert_eq!(schema.column_at(0), Some("Id"));
    }

    #[test]
    fn test_type_qualifier_is_part_of_the_cell() {
        // The store keeps the raw header text, so a type qualifier belongs
        // to the cell and lookups must use the full text.
        let schema = Schema::from_header("id INT,name");
        assert_eq!(schema.column_index("id int"), Some(0));
        assert_eq!(schema.column_index("id"), None);
    }

    #[test]
    fn test_duplicate_cells_resolve_to_first() {
        let schema = Schema::from_header("a,A,b");
        assert_eq!(schema.len(), 3);
        assert_eq!(schema.column_index("a"), Some(0));
    }
}
