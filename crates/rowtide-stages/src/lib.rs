#![forbid(unsafe_code)]
//! rowtide-stages: the lazy pipeline stages.
//!
//! Design intent:
//! - Pull-based and synchronous: a stage advances only when its consumer
//!   asks, so peak memory stays at one batch (one record for the row
//!   stream) regardless of table size.
//! - Every stage runs the same state machine (`StageState`) and releases
//!   its upstream cursor on every exit path, including errors and early
//!   abandonment.

pub mod batch_stream;
pub mod filter;
pub mod row_stream;
pub mod state;
pub mod traits;

pub use batch_stream::{BatchStream, Records};
pub use filter::{age_over, FilterStage};
pub use row_stream::RowStream;
pub use state::StageState;
pub use traits::RecordStream;
