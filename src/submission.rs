//! Payload handed to the enrichment job service once mappings are accepted.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{
    error::SubmissionError,
    fields::TargetField,
    mapping::{FieldMapping, mapped_columns, transform_rows},
    parser::{ParsedTable, is_blank},
};

/// How the enrichment service combines the submitted match keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "UPPERCASE")]
#[value(rename_all = "lower")]
pub enum Operator {
    #[default]
    Or,
    And,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichmentRequest {
    pub name: String,
    pub records: Vec<Map<String, Value>>,
    pub operator: Operator,
    pub columns: Vec<TargetField>,
}

impl EnrichmentRequest {
    /// Assembles the request from a parsed upload and its final mappings.
    /// Mapping validity is the caller's concern; see
    /// [`crate::mapping::validate_mappings()`].
    pub fn build(
        name: &str,
        operator: Operator,
        table: &ParsedTable,
        mappings: &[FieldMapping],
    ) -> Result<Self, SubmissionError> {
        if is_blank(name) {
            return Err(SubmissionError::MissingName);
        }
        Ok(Self {
            name: name.to_string(),
            records: transform_rows(&table.rows, mappings),
            operator,
            columns: mapped_columns(mappings),
        })
    }
}
