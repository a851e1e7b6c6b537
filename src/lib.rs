pub mod analyzer;
pub mod cli;
pub mod error;
pub mod export;
pub mod export_cmd;
pub mod fields;
pub mod io_utils;
pub mod mapping;
pub mod mapping_cmd;
pub mod parser;
pub mod preview;
pub mod profile;
pub mod submission;
pub mod table;

use std::{env, path::Path, sync::OnceLock};

use anyhow::{Context, Result};
use clap::Parser;
use log::{LevelFilter, info};

use crate::{
    cli::{Cli, Commands},
    fields::TargetField,
    parser::ParsedTable,
};

static LOGGER: OnceLock<()> = OnceLock::new();

fn init_logging() {
    LOGGER.get_or_init(|| {
        let mut builder = env_logger::Builder::from_env(env_logger::Env::default());
        if env::var("RUST_LOG").is_err() {
            builder.filter_module("csv_enrich", LevelFilter::Info);
        }
        let _ = builder.format_timestamp_millis().try_init();
    });
}

pub fn run() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    match cli.command {
        Commands::Preview(args) => preview::execute(&args),
        Commands::Analyze(args) => preview::execute_analyze(&args),
        Commands::Map(args) => mapping_cmd::execute_map(&args),
        Commands::Submit(args) => mapping_cmd::execute_submit(&args),
        Commands::Export(args) => export_cmd::execute(&args),
        Commands::Fields => handle_fields(),
    }
}

/// Reads and parses an uploaded CSV file.
pub(crate) fn load_table(path: &Path) -> Result<ParsedTable> {
    let text = io_utils::read_upload(path)?;
    let parsed =
        parser::parse_csv(&text).with_context(|| format!("Parsing CSV from {path:?}"))?;
    info!("Successfully processed {} rows", parsed.row_count);
    Ok(parsed)
}

fn handle_fields() -> Result<()> {
    let rows = TargetField::ALL
        .iter()
        .map(|field| {
            vec![
                field.as_str().to_string(),
                field.label().to_string(),
                field.category().to_string(),
            ]
        })
        .collect::<Vec<_>>();
    table::print_table(&["field", "label", "category"], &rows);
    Ok(())
}
