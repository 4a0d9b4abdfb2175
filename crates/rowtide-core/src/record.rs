//! Structurally-typed records, decoded from raw fetched rows.
//!
//! A backing store hands back loosely-shaped `RawRow`s. Decoding against the
//! table schema happens at fetch time, so a malformed row surfaces as a
//! `Fetch` error at the point of traversal instead of as silently coerced
//! data somewhere downstream.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::schema::{DataType, Schema};
use crate::value::Value;

/// One fetched row before validation: ordered (field name, value) pairs.
pub type RawRow = Vec<(String, Value)>;

/// One logical row of the user table. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub age: i64,
}

impl Record {
    /// Validate a raw row against `schema` and build the typed record.
    ///
    /// Every schema field must be present with a compatible value; stores
    /// that serve text protocols (CSV) may deliver ids and ages as strings,
    /// which are parsed here. Any miss is a `Fetch` error.
    pub fn decode(row: RawRow, schema: &Schema) -> Result<Self> {
        let mut id = None;
        let mut name = None;
        let mut email = None;
        let mut age = None;

        for field in &schema.fields {
            let value = row
                .iter()
                .find(|(n, _)| n == &field.name)
                .map(|(_, v)| v)
                .ok_or_else(|| {
                    Error::Fetch(format!("row is missing field '{}'", field.name))
                })?;

            match (field.data_type, value) {
                (DataType::Uuid, Value::Uuid(u)) => id = Some(*u),
                (DataType::Uuid, Value::Str(s)) => {
                    let u = Uuid::parse_str(s).map_err(|e| {
                        Error::Fetch(format!("field '{}' is not a uuid: {e}", field.name))
                    })?;
                    id = Some(u);
                }
                (DataType::Utf8, Value::Str(s)) => match field.name.as_str() {
                    "name" => name = Some(s.clone()),
                    "email" => email = Some(s.clone()),
                    other => {
                        return Err(Error::Fetch(format!("unexpected text field '{other}'")))
                    }
                },
                (DataType::Int64, Value::I64(v)) => age = Some(*v),
                (DataType::Int64, Value::Str(s)) => {
                    let v = s.trim().parse::<i64>().map_err(|e| {
                        Error::Fetch(format!("field '{}' is not an integer: {e}", field.name))
                    })?;
                    age = Some(v);
                }
                (expected, got) => {
                    return Err(Error::Fetch(format!(
                        "field '{}' has type {:?}, expected {:?}",
                        field.name,
                        got.data_type(),
                        expected
                    )));
                }
            }
        }

        Ok(Self {
            id: id.ok_or_else(|| Error::Fetch("row is missing field 'id'".into()))?,
            name: name.ok_or_else(|| Error::Fetch("row is missing field 'name'".into()))?,
            email: email.ok_or_else(|| Error::Fetch("row is missing field 'email'".into()))?,
            age: age.ok_or_else(|| Error::Fetch("row is missing field 'age'".into()))?,
        })
    }

    /// Re-encode as a raw row in schema order (handy for seeding stores).
    pub fn to_raw(&self) -> RawRow {
        vec![
            ("id".into(), Value::Uuid(self.id)),
            ("name".into(), Value::Str(self.name.clone())),
            ("email".into(), Value::Str(self.email.clone())),
            ("age".into(), Value::I64(self.age)),
        ]
    }
}

impl std::fmt::Display for Record {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{{id: {}, name: {}, email: {}, age: {}}}",
            self.id, self.name, self.email, self.age
        )
    }
}
