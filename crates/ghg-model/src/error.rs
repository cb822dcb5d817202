//! Error types for table construction and policy configuration.

use thiserror::Error;

/// Misconfiguration of an extraction policy or of reshaping parameters.
///
/// These are usage mistakes and are always reported before any output is
/// produced. Irregular cell content never produces one of these.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required policy option is absent or empty.
    #[error("required policy option '{field}' is missing or empty")]
    MissingField { field: &'static str },

    /// A policy pattern failed to compile.
    #[error("invalid regular expression for '{field}' ({pattern}): {message}")]
    InvalidPattern {
        field: &'static str,
        pattern: String,
        message: String,
    },

    /// A policy pattern does not have exactly one capture group.
    #[error("pattern for '{field}' ({pattern}) must have exactly one capture group, found {found}")]
    CaptureGroups {
        field: &'static str,
        pattern: String,
        found: usize,
    },

    /// An override maps a cell text to a blank unit or entity.
    #[error("'{field}' maps {key:?} to a blank value")]
    BlankOverride { field: &'static str, key: String },

    /// Output field names have the wrong arity.
    #[error("expected {expected} output field names, got {found}")]
    FieldNameArity { expected: usize, found: usize },

    /// Long tables with different field names cannot be concatenated.
    #[error("cannot concatenate long tables with field names {left:?} and {right:?}")]
    FieldNameMismatch {
        left: Vec<String>,
        right: Vec<String>,
    },

    /// An annotation row index lies outside the table body.
    #[error("{role} row {row} is out of range for a table with {rows} rows")]
    RowOutOfRange {
        role: &'static str,
        row: usize,
        rows: usize,
    },

    /// A policy document could not be parsed.
    #[error("failed to parse extraction policy: {message}")]
    Parse { message: String },
}

/// Structural problems with a table handed to the model constructors.
#[derive(Debug, Error)]
pub enum TableError {
    /// A row does not have one cell per column.
    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// Row keys and rows are not parallel.
    #[error("table has {rows} rows but {keys} row keys")]
    RowKeyCount { keys: usize, rows: usize },

    /// Provenance entries and column labels are not parallel.
    #[error("table has {labels} column labels but {provenance} provenance entries")]
    LabelCount { labels: usize, provenance: usize },

    /// Not enough columns to form a `(category, orig_cat_name)` row key.
    #[error("a row key needs 2 leading columns, table has {found}")]
    TooFewColumns { found: usize },
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse {
            message: err.to_string(),
        }
    }
}

/// Result type defaulting to configuration errors.
pub type Result<T, E = ConfigError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ConfigError::FieldNameArity {
            expected: 6,
            found: 5,
        };
        assert_eq!(err.to_string(), "expected 6 output field names, got 5");
    }

    #[test]
    fn test_error_from_serde_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: ConfigError = json_err.into();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
