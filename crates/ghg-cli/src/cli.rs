//! CLI argument definitions for the inventory normalizer.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use ghg_cli::pipeline::{TableInput, parse_table_input};
use ghg_model::AnnotationSource;

#[derive(Parser)]
#[command(
    name = "ghg-normalize",
    version,
    about = "Normalize wide GHG inventory tables into long records",
    long_about = "Normalize per-year greenhouse-gas inventory tables into long records.\n\n\
                  Every value column gets an explicit (entity, unit) label derived from\n\
                  the header or an annotation row, then each table is flattened into\n\
                  (category, orig_cat_name, entity, unit, time, data) records."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Prefix log lines with timestamps.
    #[arg(long = "log-timestamps", global = true)]
    pub log_timestamps: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Annotate and reshape inventory tables into one long CSV.
    Convert(ConvertArgs),

    /// Validate an extraction policy without processing any table.
    CheckPolicy(CheckPolicyArgs),
}

#[derive(Args)]
pub struct ConvertArgs {
    /// Table to convert, as YEAR=PATH. Repeat for several years.
    #[arg(
        long = "table",
        value_name = "YEAR=PATH",
        required = true,
        value_parser = parse_table_input
    )]
    pub tables: Vec<TableInput>,

    /// Extraction policy (JSON).
    #[arg(long = "policy", value_name = "PATH")]
    pub policy: PathBuf,

    /// Zero-based data row holding the unit annotations.
    #[arg(
        long = "unit-row",
        value_name = "N",
        conflicts_with = "unit_from_header",
        required_unless_present = "unit_from_header"
    )]
    pub unit_row: Option<usize>,

    /// Take units from the column headers.
    #[arg(long = "unit-from-header")]
    pub unit_from_header: bool,

    /// Zero-based data row holding the entity annotations.
    #[arg(long = "entity-row", value_name = "N")]
    pub entity_row: Option<usize>,

    /// Six output field names, comma separated.
    #[arg(long = "field-names", value_name = "NAMES", value_delimiter = ',')]
    pub field_names: Option<Vec<String>>,

    /// Lines to skip above the header line.
    #[arg(long = "skip-rows", value_name = "N", default_value_t = 0)]
    pub skip_rows: usize,

    /// Field separator of the input tables.
    #[arg(long = "separator", value_name = "CHAR", default_value = ",", value_parser = parse_separator)]
    pub separator: u8,

    /// Output CSV file (default: stdout).
    #[arg(long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,
}

impl ConvertArgs {
    pub fn unit_source(&self) -> AnnotationSource {
        match self.unit_row {
            Some(row) => AnnotationSource::Row(row),
            None => AnnotationSource::Header,
        }
    }
}

#[derive(Args)]
pub struct CheckPolicyArgs {
    /// Extraction policy (JSON).
    #[arg(long = "policy", value_name = "PATH")]
    pub policy: PathBuf,
}

fn parse_separator(value: &str) -> Result<u8, String> {
    match value.as_bytes() {
        [byte] if byte.is_ascii() => Ok(*byte),
        _ if value == "\\t" => Ok(b'\t'),
        _ => Err(format!("separator must be a single ASCII character, got '{value}'")),
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
