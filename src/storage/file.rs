//! Flat-file record store
//!
//! One text file per table under a data directory: the first line is the
//! comma-joined header, every further line is one comma-joined row. There
//! is no escaping of delimiter characters inside fields; that is a known
//! limitation of the format, not something this module works around.

use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;

use tracing::debug;

use super::row::Row;
use super::RecordStore;
use crate::catalog::Schema;
use crate::error::{Error, Result};

/// Flat-file store rooted at a data directory
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Create a store rooted at the given directory
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path of a table's backing file (table identity is the lowercase name)
    fn table_path(&self, table: &str) -> PathBuf {
        self.dir.join(format!("{}.txt", table.to_lowercase()))
    }

    fn open_table(&self, table: &str) -> Result<File> {
        let path = self.table_path(table);
        if !path.exists() {
            return Err(Error::TableNotFound(table.to_lowercase()));
        }
        Ok(File::open(path)?)
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.dir.exists() {
            fs::create_dir_all(&self.dir)?;
        }
        Ok(())
    }
}

impl RecordStore for FileStore {
    fn exists(&self, table: &str) -> bool {
        self.table_path(table).exists()
    }

    fn read_schema(&self, table: &str) -> Result<Option<Schema>> {
        let file = self.open_table(table)?;
        let mut reader = BufReader::new(file);
        let mut header = String::new();
        if reader.read_line(&mut header)? == 0 {
            return Ok(None);
        }
        let header = header.trim_end_matches(['\n', '\r']);
        Ok(Some(Schema::from_header(header)))
    }

    fn read_rows(&self, table: &str) -> Result<Vec<Row>> {
        let file = self.open_table(table)?;
        let reader = BufReader::new(file);
        let mut rows = Vec::new();
        for line in reader.lines().skip(1) {
            rows.push(Row::from_line(&line?));
        }
        debug!(table, rows = rows.len(), "loaded table rows");
        Ok(rows)
    }

    fn append_row(&self, table: &str, row: &Row) -> Result<()> {
        let path = self.table_path(table);
        if !path.exists() {
            return Err(Error::TableNotFound(table.to_lowercase()));
        }
        let mut file = OpenOptions::new().append(true).open(path)?;
        writeln!(file, "{}", row.to_line())?;
        debug!(table, "appended row");
        Ok(())
    }

    fn create_table(&self, table: &str, schema: &Schema) -> Result<()> {
        self.ensure_dir()?;
        // Creating over an existing table truncates it silently.
        let mut file = File::create(self.table_path(table))?;
        writeln!(file, "{}", schema.header_line())?;
        debug!(table, columns = schema.len(), "created table");
        Ok(())
    }
}
