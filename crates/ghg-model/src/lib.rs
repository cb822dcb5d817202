//! Data model for GHG inventory table normalization.
//!
//! Types shared by ingestion, annotation, and reshaping:
//!
//! - **table**: raw and annotated wide tables with explicit row keys
//! - **labels**: paired `(category, orig_cat_name)` and `(entity, unit)` keys
//! - **policy**: the extraction policy used to derive entity/unit labels
//! - **record**: long-format records and their output field names
//! - **provenance**: which fallback level resolved each column label

pub mod error;
pub mod labels;
pub mod policy;
pub mod provenance;
pub mod record;
pub mod table;

pub use error::{ConfigError, Result, TableError};
pub use labels::{ColumnLabel, RowKey};
pub use policy::{AnnotationSource, ExtractionPolicy};
pub use provenance::{ColumnProvenance, Resolution};
pub use record::{CANONICAL_FIELD_NAMES, FieldNames, LongRecord, LongTable};
pub use table::{AnnotatedTable, CellValue, RawTable};
