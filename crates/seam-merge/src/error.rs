//! Error types for the merge engine.

use seam_types::ComparisonError;

/// Errors that can occur while building or applying a merge.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MergeError {
    /// An underlying comparison failed or was cancelled.
    #[error(transparent)]
    Comparison(#[from] ComparisonError),

    /// The two diffs passed to the merge were not computed against the same base.
    #[error("base length mismatch: left diff has base length {left}, right diff has {right}")]
    BaseLengthMismatch {
        /// Base length of the base-to-left diff.
        left: usize,
        /// Base length of the base-to-right diff.
        right: usize,
    },
}

/// Convenience alias for merge results.
pub type MergeResult<T> = Result<T, MergeError>;
