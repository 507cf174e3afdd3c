// src/error.rs

use thiserror::Error;

/// Failures raised while turning a results page into typed rows.
///
/// All three are fatal to the page being processed; callers decide whether
/// to skip the page or abort the run.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScrapeError {
    /// Expected table/header/rows were not found in the document.
    #[error("page structure: {0}")]
    Structure(String),

    /// A column required by the schema is missing from the header row.
    #[error("schema `{schema}`: missing required column `{column}`")]
    Schema { schema: String, column: String },

    /// A mandatory cell could not be converted to its target type.
    #[error("row {row}, column `{column}`: cannot parse {value:?} as {expected}")]
    Coercion {
        row: usize,
        column: String,
        value: String,
        expected: &'static str,
    },
}
