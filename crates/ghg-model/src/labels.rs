//! Paired row and column keys.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Row key of a wide inventory table.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct RowKey {
    /// Category code (e.g. `1.A.1`).
    pub category: String,
    /// Category name as printed in the source table.
    pub orig_cat_name: String,
}

impl RowKey {
    pub fn new(category: impl Into<String>, orig_cat_name: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            orig_cat_name: orig_cat_name.into(),
        }
    }
}

/// Explicit `(entity, unit)` label of a data column.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ColumnLabel {
    pub entity: String,
    pub unit: String,
}

impl ColumnLabel {
    pub fn new(entity: impl Into<String>, unit: impl Into<String>) -> Self {
        Self {
            entity: entity.into(),
            unit: unit.into(),
        }
    }
}

impl fmt::Display for ColumnLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.entity, self.unit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_label_display() {
        assert_eq!(ColumnLabel::new("CO2", "Gg").to_string(), "CO2 [Gg]");
    }

    #[test]
    fn row_key_orders_by_category_first() {
        let a = RowKey::new("1", "Energy");
        let b = RowKey::new("2", "Agriculture");
        assert!(a < b);
    }
}
