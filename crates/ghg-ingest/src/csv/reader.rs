//! CSV reading for wide inventory tables.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use ghg_model::RawTable;
use polars::prelude::*;
use tracing::debug;

use crate::error::{IngestError, Result};
use crate::polars_utils::raw_table_from_dataframe;

/// Maximum file size for CSV loading (500 MB default).
pub const MAX_CSV_FILE_SIZE: u64 = 500 * 1024 * 1024;

/// Options controlling how an inventory CSV is read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestOptions {
    /// Lines to skip before the header line (titles, notes above the table).
    pub skip_rows: usize,
    /// Field separator byte.
    pub separator: u8,
    /// Upper bound on the file size in bytes.
    pub max_file_size: u64,
    /// Body rows read as text instead of classified values (annotation rows).
    pub text_rows: Vec<usize>,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            skip_rows: 0,
            separator: b',',
            max_file_size: MAX_CSV_FILE_SIZE,
            text_rows: Vec::new(),
        }
    }
}

impl IngestOptions {
    #[must_use]
    pub fn with_skip_rows(mut self, skip_rows: usize) -> Self {
        self.skip_rows = skip_rows;
        self
    }

    #[must_use]
    pub fn with_text_rows(mut self, rows: impl IntoIterator<Item = usize>) -> Self {
        self.text_rows.extend(rows);
        self
    }

    #[must_use]
    pub fn with_separator(mut self, separator: u8) -> Self {
        self.separator = separator;
        self
    }
}

fn open_error(path: &Path, err: std::io::Error) -> IngestError {
    if err.kind() == std::io::ErrorKind::NotFound {
        IngestError::FileNotFound {
            path: path.to_path_buf(),
        }
    } else {
        IngestError::FileRead {
            path: path.to_path_buf(),
            source: err,
        }
    }
}

/// Check file size against a limit.
pub fn check_file_size_with_limit(path: &Path, max_size: u64) -> Result<()> {
    let metadata = std::fs::metadata(path).map_err(|e| open_error(path, e))?;

    if metadata.len() > max_size {
        return Err(IngestError::FileTooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            max_size,
        });
    }

    Ok(())
}

/// Reject UTF-16 files; UTF-8 with or without BOM is accepted.
pub fn validate_encoding(path: &Path) -> Result<()> {
    let mut file = File::open(path).map_err(|e| open_error(path, e))?;

    let mut buffer = [0u8; 2];
    let bytes_read = file.read(&mut buffer).map_err(|e| IngestError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    if bytes_read == 2 {
        let encoding = match buffer {
            [0xFF, 0xFE] => Some("UTF-16 LE"),
            [0xFE, 0xFF] => Some("UTF-16 BE"),
            _ => None,
        };
        if let Some(encoding) = encoding {
            return Err(IngestError::UnsupportedEncoding {
                path: path.to_path_buf(),
                encoding,
            });
        }
    }

    Ok(())
}

/// Read one wide inventory table from CSV.
///
/// Every column is read as text and each cell is then classified as a
/// number, text, or missing value, so notation keys such as `NO` or `IE`
/// survive next to numeric values in the same column.
pub fn read_inventory_csv(path: &Path, options: &IngestOptions) -> Result<RawTable> {
    check_file_size_with_limit(path, options.max_file_size)?;
    validate_encoding(path)?;

    let separator = options.separator;
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_skip_rows(options.skip_rows)
        .with_infer_schema_length(Some(0))
        .map_parse_options(|parse_options| parse_options.with_separator(separator))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
        .finish()
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    if df.height() == 0 {
        return Err(IngestError::EmptyCsv {
            path: path.to_path_buf(),
        });
    }

    let table = raw_table_from_dataframe(&df, &options.text_rows)?;
    debug!(
        path = %path.display(),
        rows = table.height(),
        columns = table.width(),
        "read inventory table"
    );
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ghg_model::CellValue;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn test_read_inventory_csv() {
        let file = create_temp_csv(
            "code,category,CO2 (Gg),CH4 (Gg)\n1,Energy,100.5,NO\n2,Industrial processes,40,\n",
        );
        let table = read_inventory_csv(file.path(), &IngestOptions::default()).unwrap();

        assert_eq!(table.height(), 2);
        assert_eq!(table.columns(), ["CO2 (Gg)", "CH4 (Gg)"]);
        assert_eq!(table.row_keys()[0].category, "1");
        assert_eq!(table.row_keys()[1].orig_cat_name, "Industrial processes");
        assert_eq!(
            table.rows()[0],
            vec![CellValue::Number(100.5), CellValue::Text("NO".to_string())]
        );
        assert_eq!(table.rows()[1], vec![CellValue::Number(40.0), CellValue::Missing]);
    }

    #[test]
    fn test_read_inventory_csv_skip_rows_and_separator() {
        let file = create_temp_csv("Table 1: emissions\ncode;category;N2O\n3;Agriculture;1.25\n");
        let options = IngestOptions::default()
            .with_skip_rows(1)
            .with_separator(b';');
        let table = read_inventory_csv(file.path(), &options).unwrap();

        assert_eq!(table.columns(), ["N2O"]);
        assert_eq!(table.rows()[0], vec![CellValue::Number(1.25)]);
    }

    #[test]
    fn test_annotation_row_text_is_preserved() {
        let file = create_temp_csv("code,category,c1\n,,2.50\n1,Energy,2.50\n");
        let options = IngestOptions::default().with_text_rows([0]);
        let table = read_inventory_csv(file.path(), &options).unwrap();

        assert_eq!(table.rows()[0][0].as_text(), "2.50");
        assert_eq!(table.rows()[1][0], CellValue::Number(2.5));
    }

    #[test]
    fn test_read_inventory_csv_header_only_is_empty() {
        let file = create_temp_csv("code,category,CO2\n");
        let result = read_inventory_csv(file.path(), &IngestOptions::default());
        assert!(matches!(result, Err(IngestError::EmptyCsv { .. })));
    }

    #[test]
    fn test_file_not_found() {
        let result = read_inventory_csv(
            Path::new("/nonexistent/inventory_1990.csv"),
            &IngestOptions::default(),
        );
        assert!(matches!(result, Err(IngestError::FileNotFound { .. })));
    }

    #[test]
    fn test_file_too_large() {
        let file = create_temp_csv("code,category,CO2\n1,Energy,1\n");
        let result = check_file_size_with_limit(file.path(), 4);
        assert!(matches!(
            result,
            Err(IngestError::FileTooLarge { max_size: 4, .. })
        ));
    }

    #[test]
    fn test_utf16_rejected() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(&[0xFF, 0xFE, b'a', 0x00]).unwrap();
        let result = validate_encoding(file.path());
        assert!(matches!(
            result,
            Err(IngestError::UnsupportedEncoding {
                encoding: "UTF-16 LE",
                ..
            })
        ));
    }
}
