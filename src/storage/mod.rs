//! Storage module
//!
//! This module contains the record store: the contract the executor uses
//! to load and persist whole tables, and its flat-file implementation.

pub mod file;
pub mod row;

pub use file::FileStore;
pub use row::{Row, Value};

use crate::catalog::Schema;
use crate::error::Result;

/// The record store contract
///
/// A store maps lowercase table names to a schema plus an append-only
/// sequence of rows. Persistence mechanics stay behind this trait; the
/// executor never touches the filesystem directly.
pub trait RecordStore {
    /// Check whether a table exists
    fn exists(&self, table: &str) -> bool;

    /// Read a table's schema
    ///
    /// Returns `Ok(None)` when the table exists but holds no header at all
    /// (a completely empty file), which is distinct from a header with zero
    /// data rows. Fails with `TableNotFound` when the table is absent.
    fn read_schema(&self, table: &str) -> Result<Option<Schema>>;

    /// Read a table's data rows (the header line is not included)
    fn read_rows(&self, table: &str) -> Result<Vec<Row>>;

    /// Append one row to an existing table
    fn append_row(&self, table: &str, row: &Row) -> Result<()>;

    /// Create a table with the given schema
    ///
    /// An existing table of the same name is silently overwritten.
    fn create_table(&self, table: &str, schema: &Schema) -> Result<()>;
}
