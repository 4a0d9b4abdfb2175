//! Per-traversal accounting returned by the driver.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    /// Rows decoded from the backing store during this traversal.
    pub rows_scanned: u64,
    /// Batches the batching stage emitted.
    pub batches: u64,
    /// Records that passed the filter and reached the sink.
    pub matched: u64,
    /// True when the traversal stopped at the configured match limit
    /// rather than at source exhaustion.
    pub limited: bool,
    pub started_ms: u64,
    pub finished_ms: u64,
}

impl RunSummary {
    pub fn new(started_ms: u64) -> Self {
        Self {
            rows_scanned: 0,
            batches: 0,
            matched: 0,
            limited: false,
            started_ms,
            finished_ms: started_ms,
        }
    }

    pub fn finish(mut self, finished_ms: u64) -> Self {
        self.finished_ms = finished_ms;
        self
    }

    pub fn duration_ms(&self) -> u64 {
        self.finished_ms.saturating_sub(self.started_ms)
    }
}
