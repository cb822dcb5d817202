//! Conversion of long tables into Polars DataFrames.

use ghg_model::{CellValue, LongTable};
use polars::prelude::{Column, DataFrame, IntoColumn, NamedFrom, PlSmallStr, Series};

use crate::error::Result;

/// Build a DataFrame from long records, named by the table's field names.
///
/// The data column is `Float64` when every present value is numeric and
/// `String` otherwise; missing values become nulls either way.
pub fn long_table_to_dataframe(table: &LongTable) -> Result<DataFrame> {
    let names = table.fields.names();
    let records = &table.records;

    let text_column = |idx: usize, values: Vec<&str>| -> Column {
        Series::new(names[idx].as_str().into(), values).into_column()
    };

    let mut columns = vec![
        text_column(0, records.iter().map(|r| r.category.as_str()).collect()),
        text_column(1, records.iter().map(|r| r.orig_cat_name.as_str()).collect()),
        text_column(2, records.iter().map(|r| r.entity.as_str()).collect()),
        text_column(3, records.iter().map(|r| r.unit.as_str()).collect()),
        text_column(4, records.iter().map(|r| r.time.as_str()).collect()),
    ];

    let all_numeric = records
        .iter()
        .all(|r| matches!(r.data, CellValue::Number(_) | CellValue::Missing));
    let data_name: PlSmallStr = names[5].as_str().into();
    let data = if all_numeric {
        let values: Vec<Option<f64>> = records.iter().map(|r| r.data.as_f64()).collect();
        Series::new(data_name, values)
    } else {
        let texts: Vec<Option<String>> = records
            .iter()
            .map(|r| (!r.data.is_missing()).then(|| r.data.as_text().into_owned()))
            .collect();
        let values: Vec<Option<&str>> = texts.iter().map(Option::as_deref).collect();
        Series::new(data_name, values)
    };
    columns.push(data.into_column());

    Ok(DataFrame::new(columns)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ghg_model::{FieldNames, LongRecord};

    fn record(data: CellValue) -> LongRecord {
        LongRecord {
            category: "1.A".to_string(),
            orig_cat_name: "Fuel combustion".to_string(),
            entity: "CO2".to_string(),
            unit: "Gg".to_string(),
            time: "2000".to_string(),
            data,
        }
    }

    #[test]
    fn numeric_data_column_is_float() {
        let table = LongTable::new(
            FieldNames::default(),
            vec![record(CellValue::Number(1.5)), record(CellValue::Missing)],
        );
        let df = long_table_to_dataframe(&table).unwrap();
        let data = df.column("data").unwrap().f64().unwrap();
        assert_eq!(data.get(0), Some(1.5));
        assert_eq!(data.get(1), None);
    }

    #[test]
    fn mixed_data_column_is_text() {
        let table = LongTable::new(
            FieldNames::default(),
            vec![record(CellValue::Number(1.5)), record("NO".into())],
        );
        let df = long_table_to_dataframe(&table).unwrap();
        let data = df.column("data").unwrap().str().unwrap();
        assert_eq!(data.get(0), Some("1.5"));
        assert_eq!(data.get(1), Some("NO"));
    }
}
