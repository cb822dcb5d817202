//! Conversion pipeline: read, annotate, reshape, concatenate, write.

use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use tracing::{info, info_span};

use ghg_ingest::{IngestOptions, read_inventory_csv};
use ghg_model::{AnnotationSource, ExtractionPolicy, LongTable, Resolution};
use ghg_transform::{CompiledPolicy, annotate, concat_long_tables, reshape};

/// One wide table and the year its values belong to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableInput {
    pub year: i32,
    pub path: PathBuf,
}

/// Parse a `YEAR=PATH` table argument.
pub fn parse_table_input(value: &str) -> Result<TableInput, String> {
    let Some((year, path)) = value.split_once('=') else {
        return Err(format!("expected YEAR=PATH, got '{value}'"));
    };
    let year = year
        .trim()
        .parse::<i32>()
        .map_err(|_| format!("invalid year '{}' in '{value}'", year.trim()))?;
    if path.is_empty() {
        return Err(format!("missing path in '{value}'"));
    }
    Ok(TableInput {
        year,
        path: PathBuf::from(path),
    })
}

/// Settings shared by every table of one conversion run.
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    pub tables: Vec<TableInput>,
    pub unit_source: AnnotationSource,
    pub entity_row: Option<usize>,
    pub field_names: Option<Vec<String>>,
    pub ingest: IngestOptions,
}

/// Per-table counts reported after conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSummary {
    pub year: i32,
    pub path: PathBuf,
    pub rows: usize,
    pub columns: usize,
    pub records: usize,
    pub dropped_rows: usize,
    pub unit_override: usize,
    pub unit_pattern: usize,
    pub unit_default: usize,
}

#[derive(Debug)]
pub struct ConvertResult {
    pub table: LongTable,
    pub summaries: Vec<TableSummary>,
}

/// Load and validate an extraction policy from a JSON file.
pub fn load_policy(path: &Path) -> Result<ExtractionPolicy> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read policy {}", path.display()))?;
    let policy = ExtractionPolicy::from_json_str(&text)
        .with_context(|| format!("parse policy {}", path.display()))?;
    Ok(policy)
}

/// Load a policy and compile its patterns without touching any table.
pub fn check_policy(path: &Path) -> Result<ExtractionPolicy> {
    let policy = load_policy(path)?;
    CompiledPolicy::compile(&policy)
        .with_context(|| format!("compile policy {}", path.display()))?;
    Ok(policy)
}

/// Convert one wide table into long records.
pub fn convert_table(
    input: &TableInput,
    policy: &ExtractionPolicy,
    options: &ConvertOptions,
) -> Result<(LongTable, TableSummary)> {
    let span = info_span!("table", year = input.year, path = %input.path.display());
    let _guard = span.enter();

    let ingest = options
        .ingest
        .clone()
        .with_text_rows(options.unit_source.row().into_iter().chain(options.entity_row));
    let raw = read_inventory_csv(&input.path, &ingest)
        .with_context(|| format!("read {}", input.path.display()))?;
    let annotated = annotate(&raw, options.unit_source, options.entity_row, policy)
        .with_context(|| format!("annotate {}", input.path.display()))?;

    let names: Option<Vec<&str>> = options
        .field_names
        .as_ref()
        .map(|names| names.iter().map(String::as_str).collect());
    let long = reshape(&annotated, input.year, names.as_deref())
        .with_context(|| format!("reshape {}", input.path.display()))?;

    let count_units = |resolution: Resolution| {
        annotated
            .provenance()
            .iter()
            .filter(|p| p.unit == resolution)
            .count()
    };
    let summary = TableSummary {
        year: input.year,
        path: input.path.clone(),
        rows: annotated.height(),
        columns: annotated.width(),
        records: long.len(),
        dropped_rows: raw.height() - annotated.height(),
        unit_override: count_units(Resolution::Override),
        unit_pattern: count_units(Resolution::Pattern),
        unit_default: count_units(Resolution::Default),
    };
    info!(
        records = summary.records,
        dropped_rows = summary.dropped_rows,
        "converted table"
    );
    Ok((long, summary))
}

/// Convert every table and concatenate the results in argument order.
pub fn run_convert(policy: &ExtractionPolicy, options: &ConvertOptions) -> Result<ConvertResult> {
    if options.tables.is_empty() {
        bail!("no tables given");
    }
    CompiledPolicy::compile(policy).context("compile policy")?;

    let mut tables = Vec::with_capacity(options.tables.len());
    let mut summaries = Vec::with_capacity(options.tables.len());
    for input in &options.tables {
        let (table, summary) = convert_table(input, policy, options)?;
        tables.push(table);
        summaries.push(summary);
    }
    let table = concat_long_tables(tables).context("concatenate long tables")?;
    Ok(ConvertResult { table, summaries })
}

/// Write long records as CSV with the field names as the header line.
pub fn write_long_csv<W: Write>(table: &LongTable, writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer
        .write_record(table.fields.iter())
        .context("write CSV header")?;
    for record in &table.records {
        csv_writer
            .write_record(record.to_strings())
            .context("write CSV record")?;
    }
    csv_writer.flush().context("flush CSV output")?;
    Ok(())
}

/// Write the long table to `output`, or to stdout when no path is given.
pub fn write_output(table: &LongTable, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            let file =
                File::create(path).with_context(|| format!("create {}", path.display()))?;
            write_long_csv(table, file).with_context(|| format!("write {}", path.display()))
        }
        None => write_long_csv(table, io::stdout().lock()),
    }
}
