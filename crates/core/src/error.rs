use thiserror::Error;

/// Failures that stop an analysis run before any output is produced.
///
/// Zero matched paragraphs is not represented here: that is a valid
/// [`Analysis`](crate::Analysis) with no frequencies.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AnalysisError {
    #[error("No PDF input provided")]
    MissingInput,

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
