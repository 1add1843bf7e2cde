//! Command AST
//!
//! This module defines the structured forms of the five recognized
//! command shapes.

use std::fmt;

/// A parsed command
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// CREATE TABLE <name> ( <col_def>[, <col_def>]* )
    CreateTable(CreateTableCommand),
    /// INSERT INTO <name> VALUES ( <value>[, <value>]* )
    Insert(InsertCommand),
    /// DESC <name>
    Describe(DescribeCommand),
    /// SELECT ... FROM <name> [WHERE ...]
    Select(SelectCommand),
    /// SELECT ... FROM <t1> JOIN <t2> ON ... [WHERE ...]
    SelectJoin(SelectJoinCommand),
}

/// CREATE TABLE command
#[derive(Debug, Clone, PartialEq)]
pub struct CreateTableCommand {
    /// Table name, lowercased
    pub table: String,
    /// Column definition cells, verbatim text (internal spaces preserved)
    pub columns: Vec<String>,
}

/// INSERT INTO command
#[derive(Debug, Clone, PartialEq)]
pub struct InsertCommand {
    /// Table name, lowercased
    pub table: String,
    /// Value cells, verbatim text (quote characters preserved)
    pub values: Vec<String>,
}

/// DESC command
#[derive(Debug, Clone, PartialEq)]
pub struct DescribeCommand {
    /// Table name, lowercased
    pub table: String,
}

/// Single-table SELECT command
#[derive(Debug, Clone, PartialEq)]
pub struct SelectCommand {
    /// Requested columns
    pub projection: Projection,
    /// Table name, lowercased
    pub table: String,
    /// Optional WHERE clause
    pub predicate: Option<Predicate>,
}

/// Two-table SELECT ... JOIN command
#[derive(Debug, Clone, PartialEq)]
pub struct SelectJoinCommand {
    /// Requested columns (names may be table-qualified)
    pub projection: Projection,
    /// Left table name, lowercased
    pub left: String,
    /// Right table name, lowercased
    pub right: String,
    /// Join key resolved in the left table's schema
    pub left_key: ColumnRef,
    /// Join key resolved in the right table's schema
    pub right_key: ColumnRef,
    /// Optional WHERE clause; its column must be table-qualified
    pub predicate: Option<Predicate>,
}

/// Projection: all columns or an ordered list of requested names
#[derive(Debug, Clone, PartialEq)]
pub enum Projection {
    /// `*`
    Wildcard,
    /// Explicit column cells, verbatim text (internal spaces preserved),
    /// trimmed at both ends, original case
    Columns(Vec<String>),
}

/// A possibly table-qualified column reference
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnRef {
    /// Owning table, lowercased (required in join contexts)
    pub table: Option<String>,
    /// Column name, original case
    pub column: String,
}

impl fmt::Display for ColumnRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.table {
            Some(table) => write!(f, "{}.{}", table, self.column),
            None => write!(f, "{}", self.column),
        }
    }
}

/// A single comparison predicate: column, operator, literal
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    pub column: ColumnRef,
    pub op: CompareOp,
    /// Literal value; quotes already stripped (unlike INSERT values)
    pub value: String,
}

/// Comparison operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Eq,
    Neq,
    Lt,
    Gt,
    Lte,
    Gte,
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CompareOp::Eq => "=",
            CompareOp::Neq => "!=",
            CompareOp::Lt => "<",
            CompareOp::Gt => ">",
            CompareOp::Lte => "<=",
            CompareOp::Gte => ">=",
        };
        write!(f, "{}", s)
    }
}
