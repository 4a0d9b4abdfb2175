//! Predicate filtering over a record stream.
//!
//! Pulls upstream only as far as the next match; order is preserved and
//! nothing is buffered. The stage carries no state machine of its own —
//! closed/exhausted/failed all surface through the wrapped stream.

use rowtide_core::prelude::{Record, Result};

use crate::traits::RecordStream;

pub struct FilterStage<S, P> {
    inner: S,
    predicate: P,
}

impl<S, P> FilterStage<S, P>
where
    S: RecordStream,
    P: Fn(&Record) -> bool,
{
    pub fn new(inner: S, predicate: P) -> Self {
        Self { inner, predicate }
    }

    /// Borrow the wrapped stream; traversal accounting lives there.
    pub fn inner(&self) -> &S {
        &self.inner
    }
}

impl<S, P> RecordStream for FilterStage<S, P>
where
    S: RecordStream,
    P: Fn(&Record) -> bool,
{
    fn next_record(&mut self) -> Result<Option<Record>> {
        loop {
            match self.inner.next_record()? {
                Some(record) if (self.predicate)(&record) => return Ok(Some(record)),
                Some(_) => continue,
                None => return Ok(None),
            }
        }
    }

    fn close(&mut self) -> Result<()> {
        self.inner.close()
    }
}

/// The stock predicate: age strictly greater than `threshold`.
pub fn age_over(threshold: i64) -> impl Fn(&Record) -> bool {
    move |record: &Record| record.age > threshold
}
