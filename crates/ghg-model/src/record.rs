//! Long-format output records.

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};
use crate::table::CellValue;

/// Field names used when none are supplied.
pub const CANONICAL_FIELD_NAMES: [&str; 6] =
    ["category", "orig_cat_name", "entity", "unit", "time", "data"];

/// The six output field names of a long table, in record order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldNames([String; 6]);

impl FieldNames {
    /// Validate a caller-supplied list of names.
    pub fn try_from_slice<S: AsRef<str>>(names: &[S]) -> Result<Self> {
        if names.len() != CANONICAL_FIELD_NAMES.len() {
            return Err(ConfigError::FieldNameArity {
                expected: CANONICAL_FIELD_NAMES.len(),
                found: names.len(),
            });
        }
        Ok(Self(std::array::from_fn(|idx| {
            names[idx].as_ref().to_string()
        })))
    }

    pub fn names(&self) -> &[String; 6] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl Default for FieldNames {
    fn default() -> Self {
        Self(CANONICAL_FIELD_NAMES.map(String::from))
    }
}

/// One `(category, orig_cat_name, entity, unit, time, data)` tuple.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LongRecord {
    pub category: String,
    pub orig_cat_name: String,
    pub entity: String,
    pub unit: String,
    pub time: String,
    pub data: CellValue,
}

impl LongRecord {
    /// Record values as text, in field order. Missing data is empty.
    pub fn to_strings(&self) -> [String; 6] {
        [
            self.category.clone(),
            self.orig_cat_name.clone(),
            self.entity.clone(),
            self.unit.clone(),
            self.time.clone(),
            self.data.as_text().into_owned(),
        ]
    }
}

/// Ordered long records sharing one set of field names.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LongTable {
    pub fields: FieldNames,
    pub records: Vec<LongRecord>,
}

impl LongTable {
    pub fn new(fields: FieldNames, records: Vec<LongRecord>) -> Self {
        Self { fields, records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
