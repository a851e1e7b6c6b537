//! Record-to-CSV serialization for downloadable results.
//!
//! Fields containing a comma, a double quote, or a newline are wrapped in
//! quotes with inner quotes doubled; everything else is written verbatim.
//! Rows are joined with `\n`. Quoted newlines are valid output here even though
//! [`crate::parser::parse_csv()`] cannot read them back.
//!
//! The header comes from the first record's keys. Later records are expected
//! to carry the same keys; missing keys are written as empty fields and extra
//! keys are ignored. [`find_heterogeneous_record()`] lets callers detect this.

use std::borrow::Cow;

use chrono::{NaiveDate, Utc};
use itertools::Itertools;
use serde_json::{Map, Number, Value};

pub fn to_csv(records: &[Map<String, Value>]) -> String {
    let Some(first) = records.first() else {
        return String::new();
    };
    let headers = first.keys().collect::<Vec<_>>();

    let mut lines = Vec::with_capacity(records.len() + 1);
    lines.push(headers.iter().map(|header| escape_value(header)).join(","));
    for record in records {
        let line = headers
            .iter()
            .map(|header| {
                let text = stringify(record.get(header.as_str()));
                escape_value(&text).into_owned()
            })
            .join(",");
        lines.push(line);
    }
    lines.join("\n")
}

/// Quotes a single field when it would otherwise break the row structure.
pub fn escape_value(value: &str) -> Cow<'_, str> {
    if value.contains([',', '"', '\n']) {
        Cow::Owned(format!("\"{}\"", value.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(value)
    }
}

/// Text form of a record value as a browser would print it: strings verbatim,
/// `null` and absent values empty, integral numbers without a fraction, and
/// arrays as their elements joined by commas. Objects fall back to compact
/// JSON.
pub fn stringify(value: Option<&Value>) -> Cow<'_, str> {
    match value {
        None | Some(Value::Null) => Cow::Borrowed(""),
        Some(Value::String(text)) => Cow::Borrowed(text.as_str()),
        Some(Value::Number(number)) => Cow::Owned(number_text(number)),
        Some(Value::Array(items)) => Cow::Owned(
            items
                .iter()
                .map(|item| stringify(Some(item)))
                .join(","),
        ),
        Some(other) => Cow::Owned(other.to_string()),
    }
}

fn number_text(number: &Number) -> String {
    match number.as_f64() {
        Some(float) if number.is_f64() && float.fract() == 0.0 && float.abs() < 1e21 => {
            // -0 prints as 0
            let float = if float == 0.0 { 0.0 } else { float };
            format!("{float:.0}")
        }
        _ => number.to_string(),
    }
}

/// Index of the first record whose key set differs from the first record's.
pub fn find_heterogeneous_record(records: &[Map<String, Value>]) -> Option<usize> {
    let first = records.first()?;
    records.iter().position(|record| {
        record.len() != first.len() || first.keys().any(|key| !record.contains_key(key))
    })
}

/// `enrichment_{label}_{YYYY-MM-DD}.csv`, with every character of the label
/// outside `[A-Za-z0-9]` replaced by `_` and the result lowercased. Runs of
/// replaced characters are not collapsed.
pub fn enrichment_filename(label: &str, date: NaiveDate) -> String {
    let sanitized = label
        .chars()
        .map(|ch| if ch.is_ascii_alphanumeric() { ch } else { '_' })
        .collect::<String>()
        .to_ascii_lowercase();
    format!("enrichment_{sanitized}_{}.csv", date.format("%Y-%m-%d"))
}

/// [`enrichment_filename()`] stamped with the current UTC date.
pub fn enrichment_filename_today(label: &str) -> String {
    enrichment_filename(label, Utc::now().date_naive())
}
