//! Streaming CSV-backed table.
//!
//! Rows come off the file one at a time; the file is never materialized.
//! The header is checked against the table schema at `open`, so a bad file
//! fails before any traversal starts. Cell values are handed downstream as
//! text; typing them is the decode step's job.

use std::fs::File;
use std::path::PathBuf;

use csv::ReaderBuilder;

use rowtide_core::prelude::{Error, RawRow, Result, Schema, Value};

use crate::source::{RowCursor, RowSource};

/// CSV file with an `id,name,email,age` header, served in file order.
/// File order is this backend's stable order across repeated opens.
pub struct CsvTable {
    path: PathBuf,
    schema: Schema,
}

impl CsvTable {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            schema: Schema::user_table(),
        }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl RowSource for CsvTable {
    fn schema(&self) -> &Schema {
        &self.schema
    }

    fn open(&self) -> Result<Box<dyn RowCursor>> {
        let file = File::open(&self.path)
            .map_err(|e| Error::Connection(format!("open {}: {e}", self.path.display())))?;
        let mut reader = ReaderBuilder::new().has_headers(true).from_reader(file);

        let headers = reader
            .headers()
            .map_err(|e| Error::Connection(format!("read header: {e}")))?;
        let expected: Vec<&str> = self.schema.fields.iter().map(|f| f.name.as_str()).collect();
        let got: Vec<&str> = headers.iter().collect();
        if got != expected {
            return Err(Error::Connection(format!(
                "header mismatch in {}: expected {expected:?}, got {got:?}",
                self.path.display()
            )));
        }

        Ok(Box::new(CsvCursor {
            names: self.schema.fields.iter().map(|f| f.name.clone()).collect(),
            iter: Some(reader.into_records()),
            row_idx: 0,
        }))
    }
}

struct CsvCursor {
    names: Vec<String>,
    /// `None` once closed; dropping the iterator releases the file handle.
    iter: Option<csv::StringRecordsIntoIter<File>>,
    row_idx: u64,
}

impl RowCursor for CsvCursor {
    fn fetch_next(&mut self) -> Result<Option<RawRow>> {
        let iter = self.iter.as_mut().ok_or(Error::Closed)?;
        match iter.next() {
            None => Ok(None),
            Some(Err(e)) => Err(Error::Fetch(format!("row {}: {e}", self.row_idx + 1))),
            Some(Ok(record)) => {
                self.row_idx += 1;
                let row: RawRow = self
                    .names
                    .iter()
                    .cloned()
                    .zip(record.iter().map(|cell| Value::Str(cell.to_string())))
                    .collect();
                Ok(Some(row))
            }
        }
    }

    fn close(&mut self) -> Result<()> {
        self.iter = None;
        Ok(())
    }
}
