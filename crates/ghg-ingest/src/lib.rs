//! GHG inventory table ingestion.
//!
//! Loads per-year inventory tables (CSV exports of NIR/BUR tables) into
//! [`ghg_model::RawTable`]s. The first two columns of every table hold the
//! category code and the category name as printed in the source.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use ghg_ingest::{IngestOptions, read_inventory_csv};
//!
//! let table = read_inventory_csv(Path::new("tables/1995.csv"), &IngestOptions::default())?;
//! ```

mod csv;
mod error;
mod polars_utils;

// === Error Types ===
pub use error::{IngestError, Result};

// === CSV Reading ===
pub use csv::{
    IngestOptions, MAX_CSV_FILE_SIZE, check_file_size_with_limit, read_inventory_csv,
    validate_encoding,
};

// === Polars Conversion ===
pub use polars_utils::{cell_from_any, raw_table_from_dataframe};
