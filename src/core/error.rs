use thiserror::Error;

/// Hard failures raised when a submitted form cannot become a record.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("missing required field: {0}")]
    MissingRequiredField(&'static str),
}

/// Failures turning raw form text into typed values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("empty input")]
    Empty,
    #[error("invalid decimal: {0:?}")]
    InvalidDecimal(String),
    #[error("invalid date (expected YYYY-MM-DD): {0:?}")]
    InvalidDate(String),
}
