//! Per-column data-quality profiling.

use serde::{Deserialize, Serialize};

use crate::parser::{ParsedTable, Row, is_blank};

/// Number of non-empty values kept as examples for each column.
pub const SAMPLE_LIMIT: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnStats {
    pub name: String,
    /// Every row's value in row order, blanks included.
    pub values: Vec<String>,
    pub non_empty_count: usize,
    /// Share of non-blank values as a whole percentage, 0 for an empty table.
    pub completeness: u8,
    /// First [`SAMPLE_LIMIT`] non-blank values in row order.
    pub samples: Vec<String>,
}

pub fn analyze_column(name: &str, rows: &[Row]) -> ColumnStats {
    let values = rows
        .iter()
        .map(|row| row.get(name).cloned().unwrap_or_default())
        .collect::<Vec<_>>();
    let non_empty = values
        .iter()
        .filter(|value| !is_blank(value))
        .collect::<Vec<_>>();
    let non_empty_count = non_empty.len();
    let samples = non_empty
        .into_iter()
        .take(SAMPLE_LIMIT)
        .cloned()
        .collect();

    ColumnStats {
        name: name.to_string(),
        completeness: completeness_percent(non_empty_count, rows.len()),
        values,
        non_empty_count,
        samples,
    }
}

pub fn analyze_all_columns(table: &ParsedTable) -> Vec<ColumnStats> {
    table
        .columns
        .iter()
        .map(|column| analyze_column(column, &table.rows))
        .collect()
}

/// Rounds `filled / total * 100` half-up without going through floats.
fn completeness_percent(filled: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let scaled = (filled * 200 + total) / (total * 2);
    scaled.min(100) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completeness_rounds_half_up() {
        assert_eq!(completeness_percent(1, 8), 13);
        assert_eq!(completeness_percent(1, 3), 33);
        assert_eq!(completeness_percent(2, 3), 67);
        assert_eq!(completeness_percent(1, 200), 1);
        assert_eq!(completeness_percent(1, 201), 0);
    }

    #[test]
    fn completeness_is_zero_without_rows() {
        assert_eq!(completeness_percent(0, 0), 0);
    }
}
