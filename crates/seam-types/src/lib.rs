//! Foundation types for Seam.
//!
//! This crate provides the value types shared by the comparison and merge
//! crates. Every other Seam crate depends on `seam-types`.
//!
//! # Key Types
//!
//! - [`DiffFragment`] -- A difference between two byte ranges
//! - [`LineFragment`] -- A line-granularity difference with optional word detail
//! - [`Range`] / [`MergeRange`] -- Two-way and three-way index ranges
//! - [`ComparisonPolicy`] -- Whitespace handling during comparison
//! - [`CancellationToken`] -- Cooperative cancellation flag
//! - [`ComparisonConfig`] -- Engine tunables
//! - [`LineOffsets`] -- Line-number to byte-offset table

pub mod cancel;
pub mod config;
pub mod error;
pub mod fragment;
pub mod line_offsets;
pub mod policy;
pub mod range;

pub use cancel::CancellationToken;
pub use config::ComparisonConfig;
pub use error::{ComparisonError, ComparisonResult, TypeError};
pub use fragment::{DiffFragment, LineFragment};
pub use line_offsets::LineOffsets;
pub use policy::{CharComparisonMode, ComparisonPolicy, HighlightPolicy};
pub use range::{MergeRange, Range};
