//! Predicate evaluation
//!
//! A predicate is a single (column, operator, literal) comparison applied
//! to one row. `=` and `!=` compare raw text; the ordering operators parse
//! both sides as numbers and evaluate false when either side is not a
//! number, so non-numeric rows are excluded rather than erroring the query.

use crate::catalog::Schema;
use crate::sql::ast::{CompareOp, Predicate};
use crate::storage::{Row, Value};

impl CompareOp {
    /// Evaluate this operator over a stored field and a literal
    pub fn evaluate(&self, field: &Value, literal: &str) -> bool {
        match self {
            CompareOp::Eq => field.as_str() == literal,
            CompareOp::Neq => field.as_str() != literal,
            CompareOp::Lt | CompareOp::Gt | CompareOp::Lte | CompareOp::Gte => {
                let (Some(lhs), Some(rhs)) = (field.as_f64(), literal.trim().parse::<f64>().ok())
                else {
                    return false;
                };
                match self {
                    CompareOp::Lt => lhs < rhs,
                    CompareOp::Gt => lhs > rhs,
                    CompareOp::Lte => lhs <= rhs,
                    CompareOp::Gte => lhs >= rhs,
                    _ => unreachable!(),
                }
            }
        }
    }
}

/// Evaluate a predicate against one row
///
/// The predicate column resolves case-insensitively against the given
/// schema. An unresolvable column or a field index beyond the row's width
/// excludes the row; whether an unknown column is instead a query-level
/// error is the caller's decision.
pub fn matches(predicate: &Predicate, row: &Row, schema: &Schema) -> bool {
    let Some(index) = schema.column_index(&predicate.column.column) else {
        return false;
    };
    let Some(field) = row.get(index) else {
        return false;
    };
    predicate.op.evaluate(field, &predicate.value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sql::ast::ColumnRef;

    fn pred(column: &str, op: CompareOp, value: &str) -> Predicate {
        Predicate {
            column: ColumnRef {
                table: None,
                column: column.to_string(),
            },
            op,
            value: value.to_string(),
        }
    }

    #[test]
    fn test_textual_equality() {
        assert!(CompareOp::Eq.evaluate(&Value::new("Alice"), "Alice"));
        assert!(!CompareOp::Eq.evaluate(&Value::new("alice"), "Alice"));
        // Stored quotes are literal characters.
        assert!(!CompareOp::Eq.evaluate(&Value::new("'Alice'"), "Alice"));
        assert!(CompareOp::Neq.evaluate(&Value::new("Bob"), "Alice"));
    }

    #[test]
    fn test_numeric_ordering() {
        assert!(CompareOp::Lt.evaluate(&Value::new("3"), "10"));
        assert!(!CompareOp::Lt.evaluate(&Value::new("30"), "10"));
        assert!(CompareOp::Gte.evaluate(&Value::new("10"), "10"));
        assert!(CompareOp::Lte.evaluate(&Value::new("9.5"), "9.5"));
        // Numeric, not lexicographic.
        assert!(!CompareOp::Gt.evaluate(&Value::new("9"), "10"));
        assert!(CompareOp::Gt.evaluate(&Value::new("11"), "9"));
    }

    #[test]
    fn test_non_numeric_operand_excludes_row() {
        assert!(!CompareOp::Gt.evaluate(&Value::new("abc"), "1"));
        assert!(!CompareOp::Gt.evaluate(&Value::new("2"), "abc"));
        assert!(!CompareOp::Lte.evaluate(&Value::new("'3'"), "5"));
    }

    #[test]
    fn test_row_matching_resolves_case_insensitively() {
        let schema = Schema::from_header("Id,Name");
        let row = Row::from(vec!["1", "Alice"]);
        assert!(matches(&pred("id", CompareOp::Eq, "1"), &row, &schema));
        assert!(matches(&pred("NAME", CompareOp::Eq, "Alice"), &row, &schema));
    }

    #[test]
    fn test_unresolved_column_or_short_row_excludes() {
        let schema = Schema::from_header("a,b");
        let row = Row::from(vec!["1"]);
        // Unknown column: row excluded, not an error.
        assert!(!matches(&pred("c", CompareOp::Eq, "1"), &row, &schema));
        // Column resolves but the row is too short.
        assert!(!matches(&pred("b", CompareOp::Eq, "1"), &row, &schema));
    }
}
