#![forbid(unsafe_code)]
//! rowtide-core: record/batch types, schema, config, ids, and errors.
//!
//! Everything here is pure data shared by the io/stages/exec crates. The
//! streaming machinery itself lives downstream; keeping core free of IO and
//! iteration state keeps compile times low and the invariants easy to audit.

pub mod batch;
pub mod config;
pub mod error;
pub mod id;
pub mod prelude;
pub mod record;
pub mod schema;
pub mod value;

pub use error::{Error, Result};
pub use record::{RawRow, Record};
