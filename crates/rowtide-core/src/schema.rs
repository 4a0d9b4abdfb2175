//! Logical schema for the user table. Pure data; no IO here.
//!
//! `value.rs` holds the matching `Value` scalar. Decoding a fetched row
//! against this schema happens in `record.rs`.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataType {
    Int64,
    Utf8,
    Uuid,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    pub data_type: DataType,
}

impl Field {
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    pub fields: Vec<Field>,
}

impl Schema {
    pub fn new(fields: Vec<Field>) -> Self {
        Self { fields }
    }

    /// The canonical backing-store table: id, name, email, age.
    pub fn user_table() -> Self {
        Self::new(vec![
            Field::new("id", DataType::Uuid),
            Field::new("name", DataType::Utf8),
            Field::new("email", DataType::Utf8),
            Field::new("age", DataType::Int64),
        ])
    }

    pub fn field(&self, idx: usize) -> Option<&Field> {
        self.fields.get(idx)
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }
}
