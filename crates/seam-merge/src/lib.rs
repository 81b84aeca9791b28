//! Three-way merge for Seam.
//!
//! Builds on the comparison engine in `seam-diff`: both sides are aligned
//! against their common base, the aligned changes are grouped into merge
//! ranges, and each range is classified as a one-sided change or a
//! conflict. Conflicts can often be resolved at word granularity.
//!
//! # Key Types
//!
//! - [`MergeLineFragment`] -- A classified merge range in line numbers
//! - [`MergeConflictType`] / [`ChangeKind`] -- Classification of a range
//! - [`MergeOptions`] / [`MergeOutcome`] -- Input and result of [`apply_merge`]
//! - [`MergeError`] -- Error type for merge operations
//!
//! # Example
//!
//! ```
//! use seam_merge::{apply_merge, MergeOptions};
//! use seam_types::{CancellationToken, ComparisonConfig};
//!
//! let outcome = apply_merge(
//!     "a\nB\nc",
//!     "a\nb\nc",
//!     "a\nb\nC",
//!     &MergeOptions::default(),
//!     &ComparisonConfig::default(),
//!     &CancellationToken::new(),
//! )
//! .unwrap();
//! assert_eq!(outcome.text, "a\nB\nC");
//! ```

pub mod apply;
pub mod conflict;
pub mod error;
pub mod fair;
pub mod lines;
pub mod resolver;

pub use apply::{apply_merge, MergeOptions, MergeOutcome};
pub use conflict::{ChangeKind, MergeConflictType};
pub use error::{MergeError, MergeResult};
pub use fair::build_fair;
pub use lines::{merge_lines, MergeLineFragment};
pub use resolver::{try_greedy_resolve, try_resolve};
