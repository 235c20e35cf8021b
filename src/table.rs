//! Tabular output: rows sharing a union header, written as CSV

use crate::error::Result;
use crate::flatten::{Row, flatten};
use crate::normalize::WRAPPED_KEY;
use crate::types::Record;
use serde_json::Value;
use std::collections::HashSet;
use std::io::Write;
use std::path::Path;
use tracing::debug;

/// Ordered rows plus the union of their columns
///
/// Columns appear in the order they were first seen. Rows keep their
/// insertion order and are never modified after being pushed.
#[derive(Clone, Debug, Default)]
pub struct Table {
    columns: Vec<String>,
    seen: HashSet<String>,
    rows: Vec<Row>,
}

impl Table {
    /// Create an empty table with no columns
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty table whose header starts with the given columns
    ///
    /// Leading columns are written even when the table has no rows.
    pub fn with_columns<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut table = Self::new();
        for column in columns {
            table.add_column(column.into());
        }
        table
    }

    /// Build a table by flattening each record in order
    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a Record>,
    {
        let mut table = Self::new();
        for record in records {
            table.push(flatten(record));
        }
        table
    }

    fn add_column(&mut self, column: String) {
        if self.seen.insert(column.clone()) {
            self.columns.push(column);
        }
    }

    /// Append a row, extending the header with any new keys
    pub fn push(&mut self, row: Row) {
        for key in row.keys() {
            if !self.seen.contains(key) {
                self.add_column(key.clone());
            }
        }
        self.rows.push(row);
    }

    /// Header columns
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Serialize the table as CSV to any writer
    ///
    /// A table with neither columns nor rows produces no output; a table with
    /// columns but no rows produces a header line only. Rows that all flattened
    /// to nothing are written under a single blank `value` column so every row
    /// still appears.
    pub fn write_to<W: Write>(&self, writer: W) -> Result<()> {
        let mut csv = csv::WriterBuilder::new().flexible(false).from_writer(writer);

        if self.columns.is_empty() {
            if !self.rows.is_empty() {
                csv.write_record([WRAPPED_KEY])?;
                for _ in &self.rows {
                    csv.write_record([""])?;
                }
            }
        } else {
            csv.write_record(&self.columns)?;
            for row in &self.rows {
                csv.write_record(self.columns.iter().map(|column| {
                    row.get(column).map(render_cell).unwrap_or_default()
                }))?;
            }
        }

        csv.flush()?;
        Ok(())
    }

    /// Write the table to a CSV file, replacing any existing file
    pub fn write_csv(&self, path: &Path) -> Result<()> {
        let file = std::fs::File::create(path)?;
        self.write_to(std::io::BufWriter::new(file))?;
        debug!(
            "Wrote {} rows x {} columns to {}",
            self.rows.len(),
            self.columns.len(),
            path.display()
        );
        Ok(())
    }
}

/// Render one cell value as CSV text
///
/// Strings are written verbatim, null is blank, and arrays or objects are
/// written as compact JSON.
pub fn render_cell(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}
