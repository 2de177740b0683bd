//! Error taxonomy for the parse-and-categorize pipeline.
//!
//! Malformed individual statement lines are not represented here: the parsers
//! skip them and keep scanning. Only whole-batch failures surface to callers.

use thiserror::Error;

/// Statement extraction failure. Zero matched lines is not an error (the
/// result is an empty list); only structurally unusable input is.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("no statement pages provided")]
    EmptyInput,

    #[error("invalid statement grammar: {0}")]
    Pattern(#[from] regex::Error),

    #[error("invalid CSV statement: {0}")]
    InvalidCsv(String),
}

/// Categorization round-trip failure. Any of these fails the whole batch;
/// there is no partial-success path for categorization.
#[derive(Debug, Error)]
pub enum CategorizationError {
    #[error("model request failed: {0}")]
    Request(String),

    #[error("model request timed out")]
    Timeout,

    #[error("model returned no text")]
    EmptyResponse,

    #[error("model response is not valid JSON: {0}")]
    InvalidJson(String),

    #[error("model response is not a JSON array")]
    NotAnArray,

    #[error("model returned {got} categories for {expected} descriptions")]
    LengthMismatch { expected: usize, got: usize },

    #[error("model returned a label outside the category set: {0:?}")]
    UnknownCategory(String),
}

/// Failure of one whole-document pipeline run.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Categorization(#[from] CategorizationError),
}
