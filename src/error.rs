//! Crate-wide error type.

use thiserror::Error;

use crate::parser::ParseError;
use crate::validation::ValidationError;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while building, solving or decoding a DP model.
#[derive(Debug, Error)]
pub enum Error {
    /// The instance failed structural validation.
    #[error("invalid problem: {}", summarize(.0))]
    InvalidProblem(Vec<ValidationError>),

    /// The sum of processing times does not fit the DP cost type.
    #[error("horizon {horizon} exceeds the DP cost range")]
    HorizonOverflow { horizon: i64 },

    /// A transition label does not fit the current replay state.
    #[error("invalid transition at step {step}: {reason}")]
    InvalidTransition { step: usize, reason: String },

    /// A transition sequence ended before every sub-task was scheduled.
    #[error("transition sequence schedules {scheduled} of {expected} sub-tasks")]
    IncompleteSequence { scheduled: usize, expected: usize },

    /// A warm-start solution does not match the problem.
    #[error("invalid warm start: {0}")]
    InvalidWarmStart(String),

    /// The search ended without any solution.
    #[error("solution not found")]
    NoSolution,

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

fn summarize(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}
