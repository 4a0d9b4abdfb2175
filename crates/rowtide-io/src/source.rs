//! The backing-store seam: `RowSource` opens cursors, `RowCursor` walks them.
//!
//! Invariants all implementations must uphold:
//! - `open` establishes a cursor over the full row set in a stable order;
//!   repeated opens over an unmodified store see the same sequence.
//! - Cursor position only advances; there is no rewind within a traversal.
//! - `close` is idempotent, and a closed cursor refuses further fetches with
//!   `Error::Closed` instead of serving stale data.

use rowtide_core::prelude::{RawRow, Result, Schema};

/// A handle to one backing store table. Cheap to share; every traversal
/// opens its own independent cursor.
pub trait RowSource {
    /// The table's schema; rows fetched from a cursor decode against this.
    fn schema(&self) -> &Schema;

    /// Establish a fresh cursor at the first row. Fails with
    /// `Error::Connection` if the store is unreachable.
    fn open(&self) -> Result<Box<dyn RowCursor>>;
}

/// Opaque traversal state over a backing store.
pub trait RowCursor {
    /// The next row, or `None` once the cursor is exhausted. Mid-traversal
    /// failures surface as `Error::Fetch`.
    fn fetch_next(&mut self) -> Result<Option<RawRow>>;

    /// Up to `n` rows; fewer only at exhaustion. A failure mid-fill aborts
    /// the whole call rather than returning a silently truncated page.
    fn fetch_many(&mut self, n: usize) -> Result<Vec<RawRow>> {
        let mut rows = Vec::with_capacity(n);
        while rows.len() < n {
            match self.fetch_next()? {
                Some(row) => rows.push(row),
                None => break,
            }
        }
        Ok(rows)
    }

    /// Release the cursor. Safe to call more than once.
    fn close(&mut self) -> Result<()>;
}
