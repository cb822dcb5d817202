//! Polars value and DataFrame conversion.

use ghg_model::{CellValue, RawTable, TableError};
use polars::prelude::{AnyValue, DataFrame};

use crate::error::Result;

/// Convert a Polars value into a table cell.
///
/// Strings are classified like parsed CSV text, so numeric strings become
/// numbers and blank strings become missing.
pub fn cell_from_any(value: AnyValue<'_>) -> CellValue {
    match value {
        AnyValue::Null => CellValue::Missing,
        AnyValue::Int8(v) => CellValue::Number(f64::from(v)),
        AnyValue::Int16(v) => CellValue::Number(f64::from(v)),
        AnyValue::Int32(v) => CellValue::Number(f64::from(v)),
        AnyValue::Int64(v) => CellValue::Number(v as f64),
        AnyValue::UInt8(v) => CellValue::Number(f64::from(v)),
        AnyValue::UInt16(v) => CellValue::Number(f64::from(v)),
        AnyValue::UInt32(v) => CellValue::Number(f64::from(v)),
        AnyValue::UInt64(v) => CellValue::Number(v as f64),
        AnyValue::Float32(v) => CellValue::Number(f64::from(v)),
        AnyValue::Float64(v) => CellValue::Number(v),
        AnyValue::String(s) => CellValue::parse(s),
        AnyValue::StringOwned(s) => CellValue::parse(&s),
        other => CellValue::Text(other.to_string()),
    }
}

/// Non-blank strings stay text, so codes such as `4.10` are not read as numbers.
fn text_cell_from_any(value: AnyValue<'_>) -> CellValue {
    match value {
        AnyValue::String(s) if !s.trim().is_empty() => CellValue::Text(s.to_string()),
        AnyValue::StringOwned(s) if !s.trim().is_empty() => CellValue::Text(s.to_string()),
        other => cell_from_any(other),
    }
}

/// Build a [`RawTable`] from a DataFrame whose first two columns hold the
/// `(category, orig_cat_name)` row key.
///
/// Row-key cells and the cells of `text_rows` (annotation rows) keep their
/// source text; all other cells are classified with [`cell_from_any`].
pub fn raw_table_from_dataframe(df: &DataFrame, text_rows: &[usize]) -> Result<RawTable> {
    let columns = df.get_columns();
    if columns.len() < 2 {
        return Err(TableError::TooFewColumns {
            found: columns.len(),
        }
        .into());
    }
    let header: Vec<String> = columns.iter().map(|col| col.name().to_string()).collect();
    let mut grid = Vec::with_capacity(df.height());
    for row_idx in 0..df.height() {
        let text_row = text_rows.contains(&row_idx);
        let mut row = Vec::with_capacity(columns.len());
        for (col_idx, column) in columns.iter().enumerate() {
            let value = column.get(row_idx)?;
            row.push(if col_idx < 2 || text_row {
                text_cell_from_any(value)
            } else {
                cell_from_any(value)
            });
        }
        grid.push(row);
    }
    Ok(RawTable::from_grid(header, grid)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::{NamedFrom, Series};

    #[test]
    fn cell_from_any_classifies_values() {
        assert_eq!(cell_from_any(AnyValue::Null), CellValue::Missing);
        assert_eq!(cell_from_any(AnyValue::Int64(3)), CellValue::Number(3.0));
        assert_eq!(cell_from_any(AnyValue::String("2.5")), CellValue::Number(2.5));
        assert_eq!(
            cell_from_any(AnyValue::String("IE")),
            CellValue::Text("IE".to_string())
        );
        assert_eq!(cell_from_any(AnyValue::String(" ")), CellValue::Missing);
    }

    #[test]
    fn dataframe_first_columns_become_row_keys() {
        let df = DataFrame::new(vec![
            Series::new("code".into(), vec!["1", "2"]).into(),
            Series::new("name".into(), vec!["Energy", "IPPU"]).into(),
            Series::new("CO2 (Gg)".into(), vec![Some(1.0), None]).into(),
        ])
        .unwrap();
        let table = raw_table_from_dataframe(&df, &[]).unwrap();
        assert_eq!(table.columns(), ["CO2 (Gg)".to_string()]);
        assert_eq!(table.row_keys()[1].orig_cat_name, "IPPU");
        assert_eq!(table.rows()[0], vec![CellValue::Number(1.0)]);
        assert_eq!(table.rows()[1], vec![CellValue::Missing]);
    }

    #[test]
    fn category_codes_keep_their_text() {
        let df = DataFrame::new(vec![
            Series::new("code".into(), vec!["4.10"]).into(),
            Series::new("name".into(), vec!["Other"]).into(),
            Series::new("CH4".into(), vec!["0.50"]).into(),
        ])
        .unwrap();
        let table = raw_table_from_dataframe(&df, &[]).unwrap();
        assert_eq!(table.row_keys()[0].category, "4.10");
        assert_eq!(table.rows()[0], vec![CellValue::Number(0.5)]);
    }

    #[test]
    fn annotation_rows_keep_their_text() {
        let df = DataFrame::new(vec![
            Series::new("code".into(), vec![None, Some("1")]).into(),
            Series::new("name".into(), vec![None, Some("Energy")]).into(),
            Series::new("c1".into(), vec![Some("2.50"), Some("2.50")]).into(),
            Series::new("c2".into(), vec![None::<&str>, Some("1")]).into(),
        ])
        .unwrap();
        let table = raw_table_from_dataframe(&df, &[0]).unwrap();
        assert_eq!(
            table.rows()[0],
            vec![CellValue::Text("2.50".to_string()), CellValue::Missing]
        );
        assert_eq!(
            table.rows()[1],
            vec![CellValue::Number(2.5), CellValue::Number(1.0)]
        );
    }

    #[test]
    fn dataframe_needs_two_key_columns() {
        let df = DataFrame::new(vec![Series::new("code".into(), vec!["1"]).into()]).unwrap();
        let result = raw_table_from_dataframe(&df, &[]);
        assert!(matches!(
            result,
            Err(crate::IngestError::Table(TableError::TooFewColumns { found: 1 }))
        ));
    }
}
