//! Core data models for fixed-width decoding
//!
//! A [`Schema`] is an ordered list of [`FieldDefinition`]s; applying it to a
//! raw line yields a [`DecodedRecord`] of typed [`FieldValue`]s, serialized as
//! a JSON object whose keys follow schema order.

use crate::constants::data_types;
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fmt;
use std::str::FromStr;

/// Type vocabulary of a schema's type column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum FieldType {
    Text,
    Integer,
    Boolean,
}

impl FieldType {
    /// The literal used in schema files
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::Text => data_types::TEXT,
            FieldType::Integer => data_types::INTEGER,
            FieldType::Boolean => data_types::BOOLEAN,
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown type literal; carries the rejected text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownFieldType(pub String);

impl FromStr for FieldType {
    type Err = UnknownFieldType;

    /// Exact, case-sensitive match against `TEXT`, `INTEGER`, `BOOLEAN`
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            data_types::TEXT => Ok(FieldType::Text),
            data_types::INTEGER => Ok(FieldType::Integer),
            data_types::BOOLEAN => Ok(FieldType::Boolean),
            other => Err(UnknownFieldType(other.to_string())),
        }
    }
}

/// One positional column of a fixed-width line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDefinition {
    name: String,
    width: usize,
    field_type: FieldType,
}

impl FieldDefinition {
    pub fn new(name: impl Into<String>, width: usize, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            width,
            field_type,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of characters the field occupies
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn field_type(&self) -> FieldType {
        self.field_type
    }
}

/// Ordered field layout shared by every line of a data file
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Schema {
    fields: Vec<FieldDefinition>,
}

impl Schema {
    pub fn new(fields: Vec<FieldDefinition>) -> Self {
        Self { fields }
    }

    pub fn fields(&self) -> &[FieldDefinition] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Minimum line length, in characters, the schema can decode
    ///
    /// Saturates at `usize::MAX`.
    pub fn total_width(&self) -> usize {
        self.fields
            .iter()
            .fold(0usize, |total, field| total.saturating_add(field.width()))
    }
}

impl<'a> IntoIterator for &'a Schema {
    type Item = &'a FieldDefinition;
    type IntoIter = std::slice::Iter<'a, FieldDefinition>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

/// Typed value of one decoded field
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Integer(i64),
    Boolean(bool),
}

impl FieldValue {
    pub fn field_type(&self) -> FieldType {
        match self {
            FieldValue::Text(_) => FieldType::Text,
            FieldValue::Integer(_) => FieldType::Integer,
            FieldValue::Boolean(_) => FieldType::Boolean,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) => f.write_str(s),
            FieldValue::Integer(i) => write!(f, "{}", i),
            FieldValue::Boolean(b) => write!(f, "{}", b),
        }
    }
}

/// Field name to value mapping produced from one data line
///
/// Entries keep schema order and serialize as a JSON object in that order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DecodedRecord {
    entries: Vec<(String, FieldValue)>,
}

impl DecodedRecord {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, name: impl Into<String>, value: FieldValue) {
        self.entries.push((name.into(), value));
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Serialize to the JSON document submitted to the transport sink
    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

impl Serialize for DecodedRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}
