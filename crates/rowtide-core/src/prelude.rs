//! Convenient re-exports for downstream crates.

pub use crate::batch::Batch;
pub use crate::config::PipelineConfig;
pub use crate::error::{Error, Result};
pub use crate::id::CursorId;
pub use crate::record::{RawRow, Record};
pub use crate::schema::{DataType, Field, Schema};
pub use crate::value::Value;
