//! Wide-to-long reshaping of annotated tables.

use ghg_model::{AnnotatedTable, ConfigError, FieldNames, LongRecord, LongTable};
use tracing::debug;

/// Flatten an annotated table into one record per `(row, column)` cell.
///
/// Rows are traversed outer and columns inner, in table order. Every record
/// gets `year` as its time value; cell values pass through untouched. When
/// `field_names` is given it must hold exactly six names, which replace the
/// canonical `category, orig_cat_name, entity, unit, time, data`.
pub fn reshape(
    table: &AnnotatedTable,
    year: i32,
    field_names: Option<&[&str]>,
) -> Result<LongTable, ConfigError> {
    let fields = match field_names {
        Some(names) => FieldNames::try_from_slice(names)?,
        None => FieldNames::default(),
    };
    let time = year.to_string();

    let mut records = Vec::with_capacity(table.height() * table.width());
    for (key, row) in table.row_keys().iter().zip(table.rows()) {
        for (label, value) in table.labels().iter().zip(row) {
            records.push(LongRecord {
                category: key.category.clone(),
                orig_cat_name: key.orig_cat_name.clone(),
                entity: label.entity.clone(),
                unit: label.unit.clone(),
                time: time.clone(),
                data: value.clone(),
            });
        }
    }

    debug!(
        year,
        rows = table.height(),
        columns = table.width(),
        records = records.len(),
        "Reshaped table to long format"
    );
    Ok(LongTable::new(fields, records))
}

/// Concatenate per-year long tables in order.
///
/// All tables must share the same field names.
pub fn concat_long_tables<I>(tables: I) -> Result<LongTable, ConfigError>
where
    I: IntoIterator<Item = LongTable>,
{
    let mut tables = tables.into_iter();
    let Some(mut combined) = tables.next() else {
        return Ok(LongTable::default());
    };
    for table in tables {
        if table.fields != combined.fields {
            return Err(ConfigError::FieldNameMismatch {
                left: combined.fields.names().to_vec(),
                right: table.fields.names().to_vec(),
            });
        }
        combined.records.extend(table.records);
    }
    Ok(combined)
}
