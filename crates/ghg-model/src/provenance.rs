#![deny(unsafe_code)]

use serde::{Deserialize, Serialize};

/// Which level of the fallback chain produced a label component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resolution {
    /// Exact match in a manual override map.
    Override,
    /// First capture group of the configured pattern.
    Pattern,
    /// The policy's default unit.
    Default,
    /// The unparsed source text, used as entity name.
    Raw,
    /// The column header, used when the resolved entity is blank.
    Header,
    /// A `column_{idx}` placeholder, used when the header is blank too.
    ColumnIndex,
}

/// Audit record for one annotated column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnProvenance {
    /// Original column header.
    pub column: String,
    /// Text the unit was derived from.
    pub unit_text: String,
    /// Text the entity was derived from.
    pub entity_text: String,
    pub unit: Resolution,
    pub entity: Resolution,
}
