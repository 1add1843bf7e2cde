//! Query executor for flatdb
//!
//! This module executes parsed commands against a record store and
//! returns results. Each invocation is a single parse -> validate ->
//! execute pipeline; there is no retry and no rollback.

use serde::Serialize;
use tracing::debug;

use super::predicate;
use crate::catalog::Schema;
use crate::error::{Error, Result};
use crate::sql::ast::{
    Command, CreateTableCommand, DescribeCommand, InsertCommand, Projection, SelectCommand,
    SelectJoinCommand,
};
use crate::storage::{RecordStore, Row, Value};

/// Query result
#[derive(Debug, Serialize)]
pub struct QueryResult {
    /// Output header (original-case column names)
    pub columns: Vec<String>,
    /// Result rows, in source order
    pub rows: Vec<Row>,
    /// Message (for commands that return no rows)
    pub message: Option<String>,
}

impl QueryResult {
    /// Create a result with a message
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            columns: Vec::new(),
            rows: Vec::new(),
            message: Some(message.into()),
        }
    }

    /// Create a result with a header and rows
    pub fn with_rows(columns: Vec<String>, rows: Vec<Row>) -> Self {
        Self {
            columns,
            rows,
            message: None,
        }
    }
}

/// Which side of a join a WHERE clause is scoped to
enum WhereSide {
    Left,
    Right,
    /// The qualifier names neither joined table; no row can match
    Neither,
}

/// Execution engine over a record store
pub struct Engine<S: RecordStore> {
    store: S,
}

impl<S: RecordStore> Engine<S> {
    /// Create a new engine backed by the given store
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Execute a parsed command
    pub fn execute(&self, command: Command) -> Result<QueryResult> {
        match command {
            Command::CreateTable(cmd) => self.execute_create_table(cmd),
            Command::Insert(cmd) => self.execute_insert(cmd),
            Command::Describe(cmd) => self.execute_describe(cmd),
            Command::Select(cmd) => self.execute_select(cmd),
            Command::SelectJoin(cmd) => self.execute_select_join(cmd),
        }
    }

    fn execute_create_table(&self, cmd: CreateTableCommand) -> Result<QueryResult> {
        let schema = Schema::from_columns(cmd.columns);
        self.store.create_table(&cmd.table, &schema)?;
        debug!(table = %cmd.table, columns = schema.len(), "table created");
        Ok(QueryResult::with_message(format!(
            "Table '{}' created successfully",
            cmd.table
        )))
    }

    fn execute_insert(&self, cmd: InsertCommand) -> Result<QueryResult> {
        // Existence is the only check: the value count is deliberately not
        // matched against the schema width, so short or long rows are
        // stored as-is.
        if !self.store.exists(&cmd.table) {
            return Err(Error::TableNotFound(cmd.table));
        }
        let row = Row::new(cmd.values.into_iter().map(Value::new).collect());
        self.store.append_row(&cmd.table, &row)?;
        Ok(QueryResult::with_message(format!(
            "Values inserted into '{}' successfully",
            cmd.table
        )))
    }

    fn execute_describe(&self, cmd: DescribeCommand) -> Result<QueryResult> {
        match self.store.read_schema(&cmd.table)? {
            // A file with no header at all, as opposed to a header with
            // zero data rows.
            None => Ok(QueryResult::with_message(format!(
                "Table '{}' is empty",
                cmd.table
            ))),
            Some(schema) => Ok(QueryResult::with_rows(schema.columns().to_vec(), Vec::new())),
        }
    }

    fn execute_select(&self, cmd: SelectCommand) -> Result<QueryResult> {
        let schema = self.store.read_schema(&cmd.table)?.unwrap_or_default();
        let indices = resolve_projection(
            &cmd.projection,
            &schema,
            &format!("table '{}'", cmd.table),
        )?;

        // A WHERE column unknown to the schema fails the whole query here;
        // the join path instead skips rows. That asymmetry is deliberate.
        if let Some(pred) = &cmd.predicate {
            if schema.column_index(&pred.column.column).is_none() {
                return Err(Error::ColumnNotFound(
                    pred.column.column.clone(),
                    format!("table '{}'", cmd.table),
                ));
            }
        }

        let header = project_header(&schema, &indices);
        let mut rows = Vec::new();
        for row in self.store.read_rows(&cmd.table)? {
            if let Some(pred) = &cmd.predicate {
                if !predicate::matches(pred, &row, &schema) {
                    continue;
                }
            }
            rows.push(project_row(&row, &indices));
        }

        debug!(table = %cmd.table, rows = rows.len(), "select complete");
        Ok(QueryResult::with_rows(header, rows))
    }

    fn execute_select_join(&self, cmd: SelectJoinCommand) -> Result<QueryResult> {
        let left_schema = self.store.read_schema(&cmd.left)?.unwrap_or_default();
        let right_schema = self.store.read_schema(&cmd.right)?.unwrap_or_default();

        let left_idx = left_schema
            .column_index(&cmd.left_key.column)
            .ok_or_else(|| {
                Error::ColumnNotFound(
                    cmd.left_key.column.clone(),
                    format!("table '{}'", cmd.left),
                )
            })?;
        let right_idx = right_schema
            .column_index(&cmd.right_key.column)
            .ok_or_else(|| {
                Error::ColumnNotFound(
                    cmd.right_key.column.clone(),
                    format!("table '{}'", cmd.right),
                )
            })?;

        // Synthetic combined schema: every cell qualified as table.column,
        // left columns first.
        let mut combined = Vec::with_capacity(left_schema.len() + right_schema.len());
        for cell in left_schema.columns() {
            combined.push(format!("{}.{}", cmd.left, cell));
        }
        for cell in right_schema.columns() {
            combined.push(format!("{}.{}", cmd.right, cell));
        }
        let combined_schema = Schema::from_columns(combined);

        let indices = resolve_projection(&cmd.projection, &combined_schema, "joined tables")?;
        let header = project_header(&combined_schema, &indices);

        let side = cmd.predicate.as_ref().map(|p| {
            match p.column.table.as_deref() {
                Some(t) if t == cmd.left => WhereSide::Left,
                Some(t) if t == cmd.right => WhereSide::Right,
                _ => WhereSide::Neither,
            }
        });

        let left_rows = self.store.read_rows(&cmd.left)?;
        let right_rows = self.store.read_rows(&cmd.right)?;

        // Nested-loop equi-join, left-outer right-inner order. Duplicate
        // keys on either side produce the full pairwise match set.
        let mut rows = Vec::new();
        for left_row in &left_rows {
            let Some(left_key) = left_row.get(left_idx) else {
                continue;
            };
            for right_row in &right_rows {
                let Some(right_key) = right_row.get(right_idx) else {
                    continue;
                };
                if left_key != right_key {
                    continue;
                }

                if let (Some(pred), Some(side)) = (&cmd.predicate, &side) {
                    let passed = match side {
                        WhereSide::Left => predicate::matches(pred, left_row, &left_schema),
                        WhereSide::Right => predicate::matches(pred, right_row, &right_schema),
                        WhereSide::Neither => false,
                    };
                    if !passed {
                        continue;
                    }
                }

                // Projection reads from the concatenation of the actual
                // row fields, not schema-padded widths.
                let mut fields = left_row.values().to_vec();
                fields.extend(right_row.values().iter().cloned());
                rows.push(project_row(&Row::new(fields), &indices));
            }
        }

        debug!(
            left = %cmd.left,
            right = %cmd.right,
            rows = rows.len(),
            "join complete"
        );
        Ok(QueryResult::with_rows(header, rows))
    }
}

/// Resolve a projection to column indices against a schema
fn resolve_projection(
    projection: &Projection,
    schema: &Schema,
    context: &str,
) -> Result<Vec<usize>> {
    match projection {
        Projection::Wildcard => Ok((0..schema.len()).collect()),
        Projection::Columns(names) => names
            .iter()
            .map(|name| {
                schema
                    .column_index(name)
                    .ok_or_else(|| Error::ColumnNotFound(name.clone(), context.to_string()))
            })
            .collect(),
    }
}

/// Header cells for the selected indices, original case
fn project_header(schema: &Schema, indices: &[usize]) -> Vec<String> {
    indices
        .iter()
        .map(|&i| schema.column_at(i).unwrap_or_default().to_string())
        .collect()
}

/// Selected fields of one row; indices beyond the row's width render empty
fn project_row(row: &Row, indices: &[usize]) -> Row {
    Row::new(
        indices
            .iter()
            .map(|&i| row.get(i).cloned().unwrap_or_else(|| Value::new("")))
            .collect(),
    )
}
