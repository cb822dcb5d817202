//! Normalization of GHG inventory tables.
//!
//! This crate turns wide, per-year inventory tables into long records:
//!
//! - **annotate**: derive an explicit `(entity, unit)` label for every column
//! - **reshape**: flatten an annotated table into long records for one year
//! - **policy**: compiled extraction policy and the fallback chain
//! - **frame**: conversion of long tables into Polars DataFrames

pub mod annotate;
pub mod error;
pub mod frame;
pub mod policy;
pub mod reshape;

pub use annotate::annotate;
pub use error::{Result, TransformError};
pub use frame::long_table_to_dataframe;
pub use policy::CompiledPolicy;
pub use reshape::{concat_long_tables, reshape};
