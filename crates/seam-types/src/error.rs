use thiserror::Error;

/// Errors produced when constructing value types.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("fragment is empty on both sides: {0}")]
    EmptyFragment(String),

    #[error("inverted range: start {start} > end {end}")]
    InvertedRange { start: usize, end: usize },

    #[error("invalid line table: {0}")]
    InvalidLineTable(String),
}

/// Errors produced by comparison operations.
///
/// Cancellation is an expected outcome rather than a failure: callers should
/// treat [`ComparisonError::Cancelled`] as "no result".
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ComparisonError {
    /// The caller's [`CancellationToken`](crate::CancellationToken) was set.
    #[error("comparison cancelled")]
    Cancelled,

    /// An input violated a documented precondition.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// An internal result failed verification (only with `verify_iterables`).
    #[error("invariant violation: {0}")]
    InvariantViolation(String),
}

impl From<TypeError> for ComparisonError {
    fn from(err: TypeError) -> Self {
        ComparisonError::InvalidArgument(err.to_string())
    }
}

/// Convenience alias for comparison results.
pub type ComparisonResult<T> = Result<T, ComparisonError>;
