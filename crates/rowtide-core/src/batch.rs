//! Batches: bounded, ordered groups of records produced by one fetch cycle.

use serde::{Deserialize, Serialize};

use crate::record::Record;

/// An ordered group of records. The batching stage never emits an empty
/// batch; only the final batch of a traversal may be shorter than the
/// configured size.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Batch {
    pub records: Vec<Record>,
}

impl Batch {
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn into_records(self) -> Vec<Record> {
        self.records
    }
}
