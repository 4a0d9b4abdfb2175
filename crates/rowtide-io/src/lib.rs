#![forbid(unsafe_code)]
//! rowtide-io: backing-store adapters behind the `RowSource` seam.
//!
//! - `source`: the `RowSource`/`RowCursor` traits every backend implements.
//! - `mem`: in-memory table, the default store for tests and benches.
//! - `csv`: streaming CSV-file table for the CLI.
//!
//! Backends only hand out unvalidated `RawRow`s; typing them into `Record`s
//! is the streaming layer's job.

pub mod csv;
pub mod mem;
pub mod source;

pub use self::csv::CsvTable;
pub use self::mem::MemTable;
pub use self::source::{RowCursor, RowSource};
