use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::{mapping::MappingOverride, submission::Operator};

#[derive(Debug, Parser)]
#[command(author, version, about = "Prepare CSV contact lists for enrichment", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Parse a CSV file and show its first rows
    Preview(PreviewArgs),
    /// Report completeness and sample values for every column
    Analyze(AnalyzeArgs),
    /// Detect target fields for each column and review the proposed mapping
    Map(MapArgs),
    /// Build an enrichment job payload from a CSV file and its mappings
    Submit(SubmitArgs),
    /// Convert a JSON array of records into a downloadable CSV file
    Export(ExportArgs),
    /// List the target fields columns can be mapped to
    Fields,
}

#[derive(Debug, Args)]
pub struct PreviewArgs {
    /// Input CSV file ('-' reads stdin)
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,
    /// Number of rows to display
    #[arg(long, default_value_t = 10)]
    pub rows: usize,
}

#[derive(Debug, Args)]
pub struct AnalyzeArgs {
    /// Input CSV file ('-' reads stdin)
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,
}

/// Mapping adjustments shared by `map` and `submit`.
#[derive(Debug, Args)]
pub struct OverrideArgs {
    /// Mark every column as DO_NOT_IMPORT before applying --set
    #[arg(long = "skip-all")]
    pub skip_all: bool,
    /// Manual mapping such as `Work Email=BUSINESS_EMAIL` (use NONE to clear)
    #[arg(long = "set", value_parser = parse_override, action = clap::ArgAction::Append)]
    pub overrides: Vec<MappingOverride>,
}

#[derive(Debug, Args)]
pub struct MapArgs {
    /// Input CSV file ('-' reads stdin)
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,
    #[command(flatten)]
    pub adjust: OverrideArgs,
    /// Write the reviewed mappings to a YAML profile
    #[arg(long = "save")]
    pub save: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct SubmitArgs {
    /// Input CSV file ('-' reads stdin)
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,
    /// Enrichment job name (defaults to the input file name without `.csv`)
    #[arg(long)]
    pub name: Option<String>,
    /// How the service combines match keys
    #[arg(long, value_enum, default_value = "or")]
    pub operator: Operator,
    /// Mapping profile saved by `map --save` (detection runs when omitted)
    #[arg(short = 'm', long = "mappings")]
    pub mappings: Option<PathBuf>,
    #[command(flatten)]
    pub adjust: OverrideArgs,
    /// Payload destination (stdout if omitted)
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// JSON file holding an array of objects ('-' reads stdin)
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,
    /// Output CSV file ('-' writes to stdout without a byte-order mark)
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,
    /// Label used to name the file when --output is omitted
    #[arg(long, default_value = "export")]
    pub label: String,
}

pub fn parse_override(value: &str) -> Result<MappingOverride, String> {
    value.parse().map_err(|err: crate::error::MappingError| err.to_string())
}
