#![forbid(unsafe_code)]
//! rowtide: bounded-memory row streaming and batch filtering.
//!
//! Facade over the workspace crates. Pull-based stages compose as
//! RowSource → RowStream → BatchStream → FilterStage → sink, with peak
//! memory bounded by one batch regardless of table size.

pub use rowtide_core::prelude::{
    Batch, CursorId, DataType, Error, Field, PipelineConfig, RawRow, Record, Result, Schema,
    Value,
};
pub use rowtide_exec::{Pipeline, RunSummary};
pub use rowtide_io::{CsvTable, MemTable, RowCursor, RowSource};
pub use rowtide_stages::{
    age_over, BatchStream, FilterStage, RecordStream, Records, RowStream, StageState,
};
