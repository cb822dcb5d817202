//! Error types for table transformation.

use ghg_model::{ConfigError, TableError};
use thiserror::Error;

/// Errors raised while annotating, reshaping, or converting tables.
#[derive(Debug, Error)]
pub enum TransformError {
    /// Misconfigured policy or reshaping parameters.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Table shape does not fit the requested operation.
    #[error(transparent)]
    Table(#[from] TableError),

    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl From<polars::prelude::PolarsError> for TransformError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for transformation operations.
pub type Result<T> = std::result::Result<T, TransformError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_is_transparent() {
        let err: TransformError = ConfigError::FieldNameArity {
            expected: 6,
            found: 7,
        }
        .into();
        assert_eq!(err.to_string(), "expected 6 output field names, got 7");
    }

    #[test]
    fn test_error_from_polars() {
        let polars_err = polars::prelude::PolarsError::ColumnNotFound("test".into());
        let err: TransformError = polars_err.into();
        assert!(matches!(err, TransformError::DataFrame { .. }));
    }
}
