use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use log::{info, warn};
use serde_json::{Map, Value};

use crate::{cli::ExportArgs, export, io_utils};

pub fn execute(args: &ExportArgs) -> Result<()> {
    let text = io_utils::read_text(&args.input)?;
    let records: Vec<Map<String, Value>> = serde_json::from_str(&text)
        .with_context(|| format!("Parsing JSON records from {:?}", args.input))?;
    if records.is_empty() {
        bail!("No records to export");
    }
    if let Some(idx) = export::find_heterogeneous_record(&records) {
        warn!(
            "Record {} does not share the first record's fields; missing values are left empty",
            idx + 1
        );
    }

    let csv = export::to_csv(&records);
    let destination = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(export::enrichment_filename_today(&args.label)));
    io_utils::write_csv_export(&destination, &csv)?;
    if !io_utils::is_dash(&destination) {
        info!(
            "Exported {} record(s) to {:?}",
            records.len(),
            destination
        );
    }
    Ok(())
}
