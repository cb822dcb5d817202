//! CSV reading utilities.

mod reader;

pub use reader::{
    IngestOptions, MAX_CSV_FILE_SIZE, check_file_size_with_limit, read_inventory_csv,
    validate_encoding,
};
