//! Header annotation: explicit `(entity, unit)` labels for every column.
//!
//! Inventory tables carry their unit and entity information either in the
//! column headers (`"CO2 (Gg)"`) or in one or two rows of the table body.
//! [`annotate`] reads that text, resolves it through the extraction policy,
//! and returns a table whose columns carry explicit [`ColumnLabel`]s with the
//! annotation rows removed.

use std::collections::BTreeSet;

use ghg_model::{
    AnnotatedTable, AnnotationSource, ColumnLabel, ColumnProvenance, ConfigError, ExtractionPolicy,
    RawTable, Resolution,
};
use tracing::{debug, trace, warn};

use crate::error::Result;
use crate::policy::CompiledPolicy;

/// Annotate every column of `table` with an `(entity, unit)` label.
///
/// - `unit_source` names the header or the body row holding unit text.
/// - `entity_source` names a body row holding entity text; `None` reuses
///   the unit source.
///
/// Annotation rows are removed from the body, once each. Unparseable cells
/// never fail; only a misconfigured policy or an out-of-range row does, and
/// both are reported before any column is processed.
pub fn annotate(
    table: &RawTable,
    unit_source: AnnotationSource,
    entity_source: Option<usize>,
    policy: &ExtractionPolicy,
) -> Result<AnnotatedTable> {
    let compiled = CompiledPolicy::compile(policy)?;

    let unit_texts = match unit_source {
        AnnotationSource::Header => table.columns().to_vec(),
        AnnotationSource::Row(idx) => row_texts(table, idx, "unit")?,
    };
    let entity_texts = match entity_source {
        Some(idx) => row_texts(table, idx, "entity")?,
        None => unit_texts.clone(),
    };

    let mut dropped = BTreeSet::new();
    dropped.extend(unit_source.row());
    dropped.extend(entity_source);

    let mut labels = Vec::with_capacity(table.width());
    let mut provenance = Vec::with_capacity(table.width());
    for (idx, column) in table.columns().iter().enumerate() {
        let unit_text = &unit_texts[idx];
        let entity_text = &entity_texts[idx];
        let (unit, unit_resolution) = compiled.resolve_unit(unit_text);
        let (mut entity, mut entity_resolution) = compiled.resolve_entity(entity_text);
        if entity.trim().is_empty() {
            (entity, entity_resolution) = blank_entity_fallback(column, idx);
            warn!(
                column = idx,
                header = %column,
                entity = %entity,
                "Blank entity annotation, using column header"
            );
        }
        trace!(
            column = idx,
            entity = %entity,
            unit = %unit,
            entity_resolution = ?entity_resolution,
            unit_resolution = ?unit_resolution,
            "Resolved column label"
        );
        labels.push(ColumnLabel::new(entity, unit));
        provenance.push(ColumnProvenance {
            column: column.clone(),
            unit_text: unit_text.clone(),
            entity_text: entity_text.clone(),
            unit: unit_resolution,
            entity: entity_resolution,
        });
    }

    let mut row_keys = Vec::with_capacity(table.height());
    let mut rows = Vec::with_capacity(table.height());
    for (idx, (key, row)) in table.row_keys().iter().zip(table.rows()).enumerate() {
        if dropped.contains(&idx) {
            continue;
        }
        row_keys.push(key.clone());
        rows.push(row.clone());
    }

    debug!(
        columns = labels.len(),
        rows = rows.len(),
        dropped_rows = dropped.len(),
        unit_source = %unit_source,
        default_units = count(&provenance, |p| p.unit == Resolution::Default),
        raw_entities = count(&provenance, |p| p.entity == Resolution::Raw),
        "Annotated table"
    );

    Ok(AnnotatedTable::new(row_keys, labels, provenance, rows)?)
}

fn row_texts(table: &RawTable, idx: usize, role: &'static str) -> Result<Vec<String>> {
    let row = table.row(idx).ok_or(ConfigError::RowOutOfRange {
        role,
        row: idx,
        rows: table.height(),
    })?;
    Ok(row
        .iter()
        .map(|cell| cell.as_text().into_owned())
        .collect())
}

/// Entity for a column whose annotation text is blank.
fn blank_entity_fallback(header: &str, idx: usize) -> (String, Resolution) {
    if header.trim().is_empty() {
        (format!("column_{idx}"), Resolution::ColumnIndex)
    } else {
        (header.to_string(), Resolution::Header)
    }
}

fn count(provenance: &[ColumnProvenance], pred: impl Fn(&ColumnProvenance) -> bool) -> usize {
    provenance.iter().filter(|p| pred(p)).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ghg_model::{CellValue, RowKey};

    fn table_with_unit_row() -> RawTable {
        RawTable::new(
            vec![
                RowKey::new("", ""),
                RowKey::new("1", "Energy"),
                RowKey::new("2", "IPPU"),
            ],
            vec!["A".into(), "B".into()],
            vec![
                vec!["CO2 (Gg)".into(), "CH4 (kt)".into()],
                vec![10.0.into(), 1.5.into()],
                vec![4.0.into(), CellValue::Missing],
            ],
        )
        .unwrap()
    }

    fn policy() -> ExtractionPolicy {
        ExtractionPolicy::new(r"^([A-Za-z0-9]+)", "Gg").with_unit_pattern(r"\((\w+)\)")
    }

    #[test]
    fn annotates_from_body_row_and_drops_it() {
        let annotated =
            annotate(&table_with_unit_row(), AnnotationSource::Row(0), None, &policy()).unwrap();
        assert_eq!(
            annotated.labels(),
            [ColumnLabel::new("CO2", "Gg"), ColumnLabel::new("CH4", "kt")]
        );
        assert_eq!(annotated.height(), 2);
        assert_eq!(annotated.row_keys()[0], RowKey::new("1", "Energy"));
    }

    #[test]
    fn blank_annotation_uses_header() {
        let table = RawTable::new(
            vec![RowKey::default()],
            vec!["Total".into()],
            vec![vec![CellValue::Missing]],
        )
        .unwrap();
        let annotated = annotate(&table, AnnotationSource::Row(0), None, &policy()).unwrap();
        assert_eq!(annotated.labels()[0], ColumnLabel::new("Total", "Gg"));
        assert_eq!(annotated.provenance()[0].entity, Resolution::Header);
        assert_eq!(annotated.provenance()[0].entity_text, "");
        assert_eq!(annotated.height(), 0);
    }

    #[test]
    fn blank_annotation_and_header_use_column_index() {
        let table = RawTable::new(
            vec![RowKey::default(), RowKey::new("1", "Energy")],
            vec!["CO2".into(), " ".into()],
            vec![
                vec!["CO2 (Gg)".into(), CellValue::Missing],
                vec![1.0.into(), 2.0.into()],
            ],
        )
        .unwrap();
        let annotated = annotate(&table, AnnotationSource::Row(0), None, &policy()).unwrap();
        assert_eq!(annotated.labels()[1], ColumnLabel::new("column_1", "Gg"));
        assert_eq!(annotated.provenance()[0].entity, Resolution::Pattern);
        assert_eq!(annotated.provenance()[1].entity, Resolution::ColumnIndex);
    }

    #[test]
    fn out_of_range_row_is_config_error() {
        let result = annotate(
            &table_with_unit_row(),
            AnnotationSource::Row(0),
            Some(7),
            &policy(),
        );
        assert!(matches!(
            result,
            Err(crate::TransformError::Config(ConfigError::RowOutOfRange {
                role: "entity",
                row: 7,
                rows: 3
            }))
        ));
    }
}
