//! Error types for parsing uploads and applying mapping decisions.

use thiserror::Error;

/// Input problems that make an upload unusable. The caller has to supply a
/// different file; retrying the same text always fails the same way.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("CSV file is empty")]
    EmptyInput,
    #[error("CSV file has no columns")]
    NoColumns,
}

/// Problems applying user mapping decisions to a parsed table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MappingError {
    #[error("Column '{0}' not found in CSV")]
    ColumnNotFound(String),
    #[error("Invalid mapping override '{0}': expected COLUMN=FIELD")]
    MalformedOverride(String),
    #[error("Unknown target field '{0}'")]
    UnknownField(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmissionError {
    #[error("Enrichment name is required")]
    MissingName,
}
