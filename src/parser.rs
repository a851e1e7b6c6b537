//! Line-oriented CSV parsing for uploaded contact lists.
//!
//! The grammar is deliberately small: the text is split on `\n` first and each
//! line is then split into fields by [`split_line()`], which understands
//! double-quoted fields and `""` escapes. Because the line split happens before
//! field splitting, a quoted field cannot span lines. [`crate::export::to_csv()`]
//! can emit such fields; reading them back through [`parse_csv()`] splits the
//! record at the embedded newline.
//!
//! Every value is trimmed, blank lines are skipped, short lines are padded with
//! empty strings, and fields beyond the header width are dropped. Blank header
//! names are kept as empty column names.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::ParseError;

/// One data row keyed by header name. Every header of the table is present.
pub type Row = BTreeMap<String, String>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedTable {
    /// Header names in file order, trimmed but otherwise untouched.
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
    pub row_count: usize,
}

impl ParsedTable {
    /// Returns the value stored under `column` for the given row, or `""`.
    pub fn value(&self, row: usize, column: &str) -> &str {
        self.rows
            .get(row)
            .and_then(|r| r.get(column))
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Row values laid out in column order, for tabular display.
    pub fn ordered_rows(&self) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .map(|row| {
                self.columns
                    .iter()
                    .map(|column| row.get(column).cloned().unwrap_or_default())
                    .collect()
            })
            .collect()
    }
}

/// Parses raw CSV text into a header list and keyed rows.
pub fn parse_csv(text: &str) -> Result<ParsedTable, ParseError> {
    let trimmed = trim_blank(text);
    if trimmed.is_empty() {
        return Err(ParseError::EmptyInput);
    }

    let mut lines = trimmed.split('\n');
    let header_line = lines.next().ok_or(ParseError::EmptyInput)?;
    let columns = split_line(header_line);
    if columns.is_empty() {
        return Err(ParseError::NoColumns);
    }

    let mut rows = Vec::new();
    for line in lines {
        let line = trim_blank(line);
        if line.is_empty() {
            continue;
        }
        let fields = split_line(line);
        let row = columns
            .iter()
            .enumerate()
            .map(|(idx, column)| (column.clone(), fields.get(idx).cloned().unwrap_or_default()))
            .collect::<Row>();
        rows.push(row);
    }

    let row_count = rows.len();
    Ok(ParsedTable {
        columns,
        rows,
        row_count,
    })
}

/// Splits a single line into trimmed fields.
///
/// A `"` toggles quoted mode unless it is immediately followed by another `"`
/// inside a quoted section, in which case one literal quote is kept. Commas
/// only separate fields outside quotes. The result always holds at least one
/// field.
pub fn split_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                fields.push(trim_blank(&current).to_string());
                current.clear();
            }
            other => current.push(other),
        }
    }
    fields.push(trim_blank(&current).to_string());
    fields
}

/// Trims Unicode whitespace and byte-order marks from both ends.
pub(crate) fn trim_blank(value: &str) -> &str {
    value.trim_matches(|ch: char| ch.is_whitespace() || ch == '\u{feff}')
}

pub(crate) fn is_blank(value: &str) -> bool {
    trim_blank(value).is_empty()
}
