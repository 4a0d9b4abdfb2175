//! Single-pass record stream over one backing-store cursor.
//!
//! Each pull fetches one raw row and decodes it against the schema, so at
//! rest the stream holds no rows at all. Re-traversal means opening a new
//! stream; this one is forward-only.

use rowtide_core::prelude::{Error, Record, Result, Schema};
use rowtide_io::{RowCursor, RowSource};

use crate::state::StageState;
use crate::traits::RecordStream;

pub struct RowStream {
    cursor: Box<dyn RowCursor>,
    schema: Schema,
    state: StageState,
    rows_fetched: u64,
}

impl RowStream {
    /// Open a fresh cursor on `source` and wrap it.
    pub fn open(source: &dyn RowSource) -> Result<Self> {
        let cursor = source.open()?;
        Ok(Self::new(cursor, source.schema().clone()))
    }

    pub fn new(cursor: Box<dyn RowCursor>, schema: Schema) -> Self {
        Self {
            cursor,
            schema,
            state: StageState::Active,
            rows_fetched: 0,
        }
    }

    /// Rows decoded so far (traversal accounting for the driver).
    pub fn rows_fetched(&self) -> u64 {
        self.rows_fetched
    }

    pub fn state(&self) -> &StageState {
        &self.state
    }

    fn fail(&mut self, err: Error) -> Error {
        // Release the cursor before surfacing the error; a failed traversal
        // must not leak its cursor.
        let _ = self.cursor.close();
        self.state = StageState::Failed(err.to_string());
        #[cfg(feature = "tracing")]
        tracing::debug!(rows = self.rows_fetched, "row stream failed");
        err
    }
}

impl RecordStream for RowStream {
    fn next_record(&mut self) -> Result<Option<Record>> {
        if !self.state.check_pull()? {
            return Ok(None);
        }
        match self.cursor.fetch_next() {
            Ok(Some(row)) => match Record::decode(row, &self.schema) {
                Ok(record) => {
                    self.rows_fetched += 1;
                    Ok(Some(record))
                }
                Err(err) => Err(self.fail(err)),
            },
            Ok(None) => {
                // Cursor lifetime ends at exhaustion, not at stream drop.
                self.cursor.close()?;
                self.state = StageState::Exhausted;
                Ok(None)
            }
            Err(err) => Err(self.fail(err)),
        }
    }

    fn close(&mut self) -> Result<()> {
        if self.state == StageState::Closed {
            return Ok(());
        }
        self.cursor.close()?;
        self.state = StageState::Closed;
        Ok(())
    }
}

impl Iterator for RowStream {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_record().transpose()
    }
}

impl Drop for RowStream {
    fn drop(&mut self) {
        // Abandonment without an explicit close still releases the cursor.
        let _ = self.cursor.close();
    }
}
