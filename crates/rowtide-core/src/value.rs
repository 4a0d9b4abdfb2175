//! Scalar cell values as fetched from a backing store.
//!
//! The domain needs exactly three shapes: strings, 64-bit integers, and
//! unique identifiers. There is deliberately no `Null` variant; a store
//! handing back a missing cell is a malformed row, reported as a fetch error
//! during decode (see `record.rs`).

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::schema::DataType;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Value {
    I64(i64),
    Str(String),
    Uuid(Uuid),
}

impl Value {
    pub fn data_type(&self) -> DataType {
        match self {
            Value::I64(_) => DataType::Int64,
            Value::Str(_) => DataType::Utf8,
            Value::Uuid(_) => DataType::Uuid,
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::I64(v) => write!(f, "{v}"),
            Value::Str(s) => write!(f, "{s}"),
            Value::Uuid(u) => write!(f, "{u}"),
        }
    }
}
