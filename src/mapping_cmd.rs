//! `map` and `submit`: review detected mappings and turn them into a job payload.

use anyhow::{Context, Result, anyhow};
use itertools::Itertools;
use log::{debug, info, warn};

use crate::{
    cli::{MapArgs, OverrideArgs, SubmitArgs},
    io_utils, load_table,
    mapping::{self, FieldMapping},
    profile::MappingProfile,
    submission::EnrichmentRequest,
    table,
};

pub fn execute_map(args: &MapArgs) -> Result<()> {
    let parsed = load_table(&args.input)?;
    let mut mappings = mapping::detect_fields(&parsed.columns, &parsed.rows);
    log_detections(&mappings);
    info!(
        "{} field(s) auto-mapped",
        mapping::auto_mapped_count(&mappings)
    );
    apply_adjustments(&mut mappings, &args.adjust)?;

    table::print_table(
        &["column", "field", "confidence", "complete", "auto", "samples"],
        &render_rows(&mappings),
    );

    let validation = mapping::validate_mappings(&mappings);
    match validation.first_error() {
        Some(message) => warn!("{message}"),
        None => info!(
            "{} column(s) ready for import",
            mapping::mapped_columns(&mappings).len()
        ),
    }

    if let Some(path) = &args.save {
        MappingProfile::new(mappings)
            .save(path)
            .with_context(|| format!("Saving mapping profile to {path:?}"))?;
        info!("Mapping profile written to {path:?}");
    }
    Ok(())
}

pub fn execute_submit(args: &SubmitArgs) -> Result<()> {
    let parsed = load_table(&args.input)?;
    let mut mappings = match &args.mappings {
        Some(path) => MappingProfile::load(path)?
            .into_mappings_for(&parsed)
            .with_context(|| format!("Applying mapping profile {path:?} to {:?}", args.input))?,
        None => {
            let detected = mapping::detect_fields(&parsed.columns, &parsed.rows);
            log_detections(&detected);
            detected
        }
    };
    apply_adjustments(&mut mappings, &args.adjust)?;

    let validation = mapping::validate_mappings(&mappings);
    if let Some(message) = validation.first_error() {
        return Err(anyhow!("{message}"));
    }

    let name = job_name(args);
    let request = EnrichmentRequest::build(&name, args.operator, &parsed, &mappings)?;
    debug!(
        "Submitting columns: {}",
        request.columns.iter().join(", ")
    );
    let payload =
        serde_json::to_string_pretty(&request).context("Serializing enrichment request")?;
    io_utils::write_output(args.output.as_deref(), &payload)?;
    info!(
        "Prepared enrichment '{}' with {} record(s) across {} column(s)",
        request.name,
        request.records.len(),
        request.columns.len()
    );
    Ok(())
}

/// `--name`, or the upload's file name without its extension.
fn job_name(args: &SubmitArgs) -> String {
    match &args.name {
        Some(name) => name.clone(),
        None if io_utils::is_dash(&args.input) => String::new(),
        None => args
            .input
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default(),
    }
}

fn log_detections(mappings: &[FieldMapping]) {
    for m in mappings {
        match m.mapped_field() {
            Some(field) => debug!(
                "Column '{}' detected as {} (confidence {})",
                m.csv_column, field, m.confidence
            ),
            None => debug!("Column '{}' has no detected field", m.csv_column),
        }
    }
}

fn apply_adjustments(mappings: &mut [FieldMapping], adjust: &OverrideArgs) -> Result<()> {
    if adjust.skip_all {
        mapping::skip_all(mappings);
        debug!("Marked {} column(s) as DO_NOT_IMPORT", mappings.len());
    }
    for decision in &adjust.overrides {
        mapping::apply_override(mappings, decision)?;
        debug!(
            "Column '{}' manually mapped to {}",
            decision.column,
            decision
                .field
                .map_or_else(|| "nothing".to_string(), |field| field.to_string())
        );
    }
    Ok(())
}

fn render_rows(mappings: &[FieldMapping]) -> Vec<Vec<String>> {
    mappings
        .iter()
        .map(|m| {
            vec![
                m.csv_column.clone(),
                m.mapped_field().map(|f| f.to_string()).unwrap_or_default(),
                m.confidence.to_string(),
                format!("{}%", m.completeness),
                if m.is_auto_mapped() { "yes" } else { "" }.to_string(),
                m.samples.iter().join(" | "),
            ]
        })
        .collect()
}
