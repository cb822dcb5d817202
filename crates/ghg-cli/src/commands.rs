use anyhow::Result;
use tracing::{info, info_span};

use ghg_cli::pipeline::{ConvertOptions, ConvertResult, check_policy, load_policy, write_output};
use ghg_ingest::IngestOptions;

use crate::cli::{CheckPolicyArgs, ConvertArgs};

pub fn run_convert(args: &ConvertArgs) -> Result<ConvertResult> {
    let span = info_span!("convert", tables = args.tables.len());
    let _guard = span.enter();

    let policy = load_policy(&args.policy)?;
    let options = ConvertOptions {
        tables: args.tables.clone(),
        unit_source: args.unit_source(),
        entity_row: args.entity_row,
        field_names: args.field_names.clone(),
        ingest: IngestOptions::default()
            .with_skip_rows(args.skip_rows)
            .with_separator(args.separator),
    };
    let result = ghg_cli::pipeline::run_convert(&policy, &options)?;
    write_output(&result.table, args.output.as_deref())?;
    info!(records = result.table.len(), "wrote long table");
    Ok(result)
}

pub fn run_check_policy(args: &CheckPolicyArgs) -> Result<()> {
    let policy = check_policy(&args.policy)?;
    println!(
        "policy OK: {} unit overrides, {} entity overrides, default unit '{}'",
        policy.unit_overrides.len(),
        policy.entity_overrides.len(),
        policy.default_unit
    );
    Ok(())
}
