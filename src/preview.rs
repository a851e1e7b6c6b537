use anyhow::Result;
use itertools::Itertools;
use log::info;

use crate::{
    analyzer::analyze_all_columns,
    cli::{AnalyzeArgs, PreviewArgs},
    load_table, table,
};

pub fn execute(args: &PreviewArgs) -> Result<()> {
    let parsed = load_table(&args.input)?;
    let headers = parsed.columns.iter().map(String::as_str).collect::<Vec<_>>();
    let rows = parsed
        .ordered_rows()
        .into_iter()
        .take(args.rows)
        .collect::<Vec<_>>();
    table::print_table(&headers, &rows);
    info!(
        "Displayed {} of {} row(s) from {:?}",
        rows.len(),
        parsed.row_count,
        args.input
    );
    Ok(())
}

pub fn execute_analyze(args: &AnalyzeArgs) -> Result<()> {
    let parsed = load_table(&args.input)?;
    let rows = analyze_all_columns(&parsed)
        .into_iter()
        .map(|stats| {
            vec![
                stats.name,
                stats.non_empty_count.to_string(),
                format!("{}%", stats.completeness),
                stats.samples.iter().join(" | "),
            ]
        })
        .collect::<Vec<_>>();
    table::print_table(&["column", "filled", "complete", "samples"], &rows);
    info!(
        "Analyzed {} column(s) across {} row(s)",
        parsed.columns.len(),
        parsed.row_count
    );
    Ok(())
}
