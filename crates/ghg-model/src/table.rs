#![deny(unsafe_code)]

use std::borrow::Cow;

use crate::error::TableError;
use crate::labels::{ColumnLabel, RowKey};
use crate::provenance::ColumnProvenance;

/// A single cell of an inventory table.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", content = "value")]
pub enum CellValue {
    Text(String),
    Number(f64),
    Missing,
}

impl CellValue {
    /// Classify raw cell text: blank is missing, numeric text is a number.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Self::Missing;
        }
        match trimmed.parse::<f64>() {
            Ok(value) if value.is_finite() => Self::Number(value),
            _ => Self::Text(raw.to_string()),
        }
    }

    /// Text used for override lookup and pattern matching.
    ///
    /// Numbers print without a trailing `.0`; missing cells are empty.
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            Self::Text(text) => Cow::Borrowed(text.as_str()),
            Self::Number(value) => Cow::Owned(format!("{value}")),
            Self::Missing => Cow::Borrowed(""),
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            _ => None,
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<Option<f64>> for CellValue {
    fn from(value: Option<f64>) -> Self {
        value.map_or(Self::Missing, Self::Number)
    }
}

fn check_rows(rows: &[Vec<CellValue>], width: usize) -> Result<(), TableError> {
    for (idx, row) in rows.iter().enumerate() {
        if row.len() != width {
            return Err(TableError::RaggedRow {
                row: idx,
                expected: width,
                found: row.len(),
            });
        }
    }
    Ok(())
}

/// Wide inventory table as produced by a parser, before annotation.
///
/// `row_keys` and `rows` are parallel; every row has one cell per entry of
/// `columns`.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RawTable {
    row_keys: Vec<RowKey>,
    columns: Vec<String>,
    rows: Vec<Vec<CellValue>>,
}

impl RawTable {
    pub fn new(
        row_keys: Vec<RowKey>,
        columns: Vec<String>,
        rows: Vec<Vec<CellValue>>,
    ) -> Result<Self, TableError> {
        if row_keys.len() != rows.len() {
            return Err(TableError::RowKeyCount {
                keys: row_keys.len(),
                rows: rows.len(),
            });
        }
        check_rows(&rows, columns.len())?;
        Ok(Self {
            row_keys,
            columns,
            rows,
        })
    }

    /// Build a table from a full grid whose first two columns hold the
    /// `(category, orig_cat_name)` key.
    pub fn from_grid(header: Vec<String>, grid: Vec<Vec<CellValue>>) -> Result<Self, TableError> {
        if header.len() < 2 {
            return Err(TableError::TooFewColumns {
                found: header.len(),
            });
        }
        check_rows(&grid, header.len())?;
        let columns = header[2..].to_vec();
        let mut row_keys = Vec::with_capacity(grid.len());
        let mut rows = Vec::with_capacity(grid.len());
        for mut row in grid {
            let data = row.split_off(2);
            row_keys.push(RowKey::new(row[0].as_text(), row[1].as_text()));
            rows.push(data);
        }
        Ok(Self {
            row_keys,
            columns,
            rows,
        })
    }

    pub fn row_keys(&self) -> &[RowKey] {
        &self.row_keys
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    pub fn row(&self, idx: usize) -> Option<&[CellValue]> {
        self.rows.get(idx).map(Vec::as_slice)
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }
}

/// Wide table whose columns carry explicit `(entity, unit)` labels.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AnnotatedTable {
    row_keys: Vec<RowKey>,
    labels: Vec<ColumnLabel>,
    provenance: Vec<ColumnProvenance>,
    rows: Vec<Vec<CellValue>>,
}

impl AnnotatedTable {
    pub fn new(
        row_keys: Vec<RowKey>,
        labels: Vec<ColumnLabel>,
        provenance: Vec<ColumnProvenance>,
        rows: Vec<Vec<CellValue>>,
    ) -> Result<Self, TableError> {
        if row_keys.len() != rows.len() {
            return Err(TableError::RowKeyCount {
                keys: row_keys.len(),
                rows: rows.len(),
            });
        }
        if provenance.len() != labels.len() {
            return Err(TableError::LabelCount {
                labels: labels.len(),
                provenance: provenance.len(),
            });
        }
        check_rows(&rows, labels.len())?;
        Ok(Self {
            row_keys,
            labels,
            provenance,
            rows,
        })
    }

    pub fn row_keys(&self) -> &[RowKey] {
        &self.row_keys
    }

    pub fn labels(&self) -> &[ColumnLabel] {
        &self.labels
    }

    /// How each column label was resolved, parallel to [`Self::labels`].
    pub fn provenance(&self) -> &[ColumnProvenance] {
        &self.provenance
    }

    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn width(&self) -> usize {
        self.labels.len()
    }
}
