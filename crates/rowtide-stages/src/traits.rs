//! The stage seam: anything that lazily yields validated records.
//!
//! Both the raw `RowStream` and the flattened batch stream implement this,
//! which is what lets the filter stage sit behind either (the driver uses
//! the flattened form).

use rowtide_core::prelude::{Record, Result};

pub trait RecordStream {
    /// The next record, `Ok(None)` at exhaustion, `Err` on closed/failed
    /// streams and on upstream fetch failures.
    fn next_record(&mut self) -> Result<Option<Record>>;

    /// Release upstream resources. Idempotent; pulls after an explicit
    /// close report `Error::Closed`.
    fn close(&mut self) -> Result<()>;
}
