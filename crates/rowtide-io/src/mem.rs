//! In-memory backing store.
//!
//! The default table for tests and benches, mirroring the contract a real
//! database cursor would give us: stable id order, independent cursors, and
//! bookkeeping the tests can observe (`open_cursors`, `rows_served`).

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use rowtide_core::prelude::{CursorId, Error, RawRow, Record, Result, Schema, Value};
use uuid::Uuid;

use crate::source::{RowCursor, RowSource};

struct Shared {
    rows: Vec<RawRow>,
    open: HashSet<CursorId>,
    next_cursor: u64,
    rows_served: u64,
}

/// Thread-safe in-memory table kept in id order.
#[derive(Clone)]
pub struct MemTable {
    schema: Schema,
    inner: Arc<Mutex<Shared>>,
}

impl MemTable {
    pub fn new() -> Self {
        Self {
            schema: Schema::user_table(),
            inner: Arc::new(Mutex::new(Shared {
                rows: Vec::new(),
                open: HashSet::new(),
                next_cursor: 0,
                rows_served: 0,
            })),
        }
    }

    /// Insert a well-typed record, keeping the table in id order.
    pub fn insert(&self, record: &Record) {
        let mut inner = self.inner.lock().unwrap();
        inner.rows.push(record.to_raw());
        inner.rows.sort_by_key(sort_key);
    }

    /// Insert a raw row as-is (used by tests to plant malformed rows).
    /// Rows without a parseable id sort after all well-formed rows.
    pub fn insert_raw(&self, row: RawRow) {
        let mut inner = self.inner.lock().unwrap();
        inner.rows.push(row);
        inner.rows.sort_by_key(sort_key);
    }

    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of cursors currently open (used by tests to verify release).
    pub fn open_cursors(&self) -> usize {
        self.inner.lock().unwrap().open.len()
    }

    /// Total rows handed out across all cursors (used by tests to verify
    /// the driver never over-fetches).
    pub fn rows_served(&self) -> u64 {
        self.inner.lock().unwrap().rows_served
    }
}

impl Default for MemTable {
    fn default() -> Self {
        Self::new()
    }
}

fn sort_key(row: &RawRow) -> (u8, Uuid) {
    let id = row.iter().find(|(n, _)| n == "id").and_then(|(_, v)| match v {
        Value::Uuid(u) => Some(*u),
        Value::Str(s) => Uuid::parse_str(s).ok(),
        Value::I64(_) => None,
    });
    match id {
        Some(u) => (0, u),
        None => (1, Uuid::nil()),
    }
}

impl RowSource for MemTable {
    fn schema(&self) -> &Schema {
        &self.schema
    }

    fn open(&self) -> Result<Box<dyn RowCursor>> {
        let mut inner = self.inner.lock().unwrap();
        let id = CursorId::new(inner.next_cursor);
        inner.next_cursor += 1;
        inner.open.insert(id);
        Ok(Box::new(MemCursor {
            id,
            inner: Arc::clone(&self.inner),
            pos: 0,
            closed: false,
        }))
    }
}

struct MemCursor {
    id: CursorId,
    inner: Arc<Mutex<Shared>>,
    pos: usize,
    closed: bool,
}

impl RowCursor for MemCursor {
    fn fetch_next(&mut self) -> Result<Option<RawRow>> {
        if self.closed {
            return Err(Error::Closed);
        }
        let mut inner = self.inner.lock().unwrap();
        match inner.rows.get(self.pos) {
            Some(row) => {
                let row = row.clone();
                self.pos += 1;
                inner.rows_served += 1;
                Ok(Some(row))
            }
            None => Ok(None),
        }
    }

    fn fetch_many(&mut self, n: usize) -> Result<Vec<RawRow>> {
        if self.closed {
            return Err(Error::Closed);
        }
        let mut inner = self.inner.lock().unwrap();
        let end = (self.pos + n).min(inner.rows.len());
        let page: Vec<RawRow> = inner.rows[self.pos..end].to_vec();
        inner.rows_served += page.len() as u64;
        self.pos = end;
        Ok(page)
    }

    fn close(&mut self) -> Result<()> {
        if !self.closed {
            self.closed = true;
            self.inner.lock().unwrap().open.remove(&self.id);
        }
        Ok(())
    }
}

impl Drop for MemCursor {
    fn drop(&mut self) {
        let _ = self.close();
    }
}
