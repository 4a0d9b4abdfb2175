//! Groups a record stream into fixed-size batches.
//!
//! Full batches of `batch_size`, then at most one shorter final batch.
//! Empty batches are never emitted; an upstream error mid-batch aborts the
//! whole batch rather than emitting a truncated one. The source is usually
//! a `RowStream`, but any record stream batches the same way (a filtered
//! stream, for instance).

use rowtide_core::prelude::{Batch, Error, Record, Result};

use crate::row_stream::RowStream;
use crate::state::StageState;
use crate::traits::RecordStream;

pub struct BatchStream<S = RowStream> {
    source: S,
    batch_size: usize,
    state: StageState,
    batches_emitted: u64,
    rows_pulled: u64,
}

impl<S: RecordStream> BatchStream<S> {
    /// Wrap `source`, validating `batch_size` up front. A batch size of
    /// zero is a configuration error; the unsigned type already rules out
    /// negatives.
    pub fn new(source: S, batch_size: usize) -> Result<Self> {
        if batch_size == 0 {
            return Err(Error::Config("batch_size must be >= 1".into()));
        }
        Ok(Self {
            source,
            batch_size,
            state: StageState::Active,
            batches_emitted: 0,
            rows_pulled: 0,
        })
    }

    /// The next batch, or `None` once the source is drained.
    pub fn next_batch(&mut self) -> Result<Option<Batch>> {
        if !self.state.check_pull()? {
            return Ok(None);
        }
        let mut records = Vec::with_capacity(self.batch_size);
        while records.len() < self.batch_size {
            match self.source.next_record() {
                Ok(Some(record)) => {
                    self.rows_pulled += 1;
                    records.push(record);
                }
                Ok(None) => break,
                Err(err) => {
                    self.state = StageState::Failed(err.to_string());
                    return Err(err);
                }
            }
        }

        if records.is_empty() {
            self.state = StageState::Exhausted;
            return Ok(None);
        }
        if records.len() < self.batch_size {
            // Partial batch: emit it now, report exhaustion on the next pull.
            self.state = StageState::Exhausted;
        }
        self.batches_emitted += 1;
        #[cfg(feature = "tracing")]
        tracing::trace!(
            batch = self.batches_emitted,
            rows = records.len(),
            "emitted batch"
        );
        Ok(Some(Batch::new(records)))
    }

    pub fn batches_emitted(&self) -> u64 {
        self.batches_emitted
    }

    /// Records pulled from the source so far (traversal accounting).
    pub fn rows_pulled(&self) -> u64 {
        self.rows_pulled
    }

    pub fn close(&mut self) -> Result<()> {
        if self.state == StageState::Closed {
            return Ok(());
        }
        self.source.close()?;
        self.state = StageState::Closed;
        Ok(())
    }

    /// Flatten back into a record stream. The adapter holds at most the one
    /// in-flight batch.
    pub fn into_records(self) -> Records<S> {
        Records {
            batches: self,
            current: Vec::new().into_iter(),
        }
    }
}

impl<S: RecordStream> Iterator for BatchStream<S> {
    type Item = Result<Batch>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_batch().transpose()
    }
}

/// Record-at-a-time view over a `BatchStream`.
pub struct Records<S = RowStream> {
    batches: BatchStream<S>,
    current: std::vec::IntoIter<Record>,
}

impl<S: RecordStream> Records<S> {
    pub fn batches_emitted(&self) -> u64 {
        self.batches.batches_emitted()
    }

    pub fn rows_pulled(&self) -> u64 {
        self.batches.rows_pulled()
    }
}

impl<S: RecordStream> RecordStream for Records<S> {
    fn next_record(&mut self) -> Result<Option<Record>> {
        if let Some(record) = self.current.next() {
            return Ok(Some(record));
        }
        match self.batches.next_batch()? {
            Some(batch) => {
                self.current = batch.into_records().into_iter();
                Ok(self.current.next())
            }
            None => Ok(None),
        }
    }

    fn close(&mut self) -> Result<()> {
        self.batches.close()
    }
}
