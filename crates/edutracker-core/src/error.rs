//! Validation error types.
//!
//! Creation operations on the entity store are the only place the engine
//! reports a failure. Everything else (missing assessments, unknown students,
//! unreadable sessions) degrades to a documented default instead.

use thiserror::Error;

/// Invalid input to `create_assessment` or `create_result`.
///
/// Returned before anything is appended, so a failed creation never leaves a
/// partial record behind.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// The assessment's max score was zero, negative, or not a number.
    #[error("max score must be a positive number, got {0}")]
    NonPositiveMaxScore(f64),

    /// A required text field was empty or whitespace only.
    #[error("{0} must not be empty")]
    EmptyField(&'static str),

    /// The score was NaN or infinite.
    #[error("score must be a finite number, got {0}")]
    InvalidScore(f64),

    /// The collection already holds the largest representable id.
    #[error("no {0} ids left to allocate")]
    IdsExhausted(&'static str),
}

impl ValidationError {
    /// Name of the offending field, for form-style error display.
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::NonPositiveMaxScore(_) => "maxScore",
            ValidationError::EmptyField(field) => field,
            ValidationError::InvalidScore(_) => "score",
            ValidationError::IdsExhausted(_) => "id",
        }
    }
}
