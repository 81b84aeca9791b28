//! Comparison engine for Seam.
//!
//! Computes whitespace-aware differences between two texts at character,
//! word and line granularity. All operations are pure functions over string
//! slices; long comparisons can be interrupted with a
//! [`CancellationToken`](seam_types::CancellationToken).
//!
//! # Key Types
//!
//! - [`ComparisonManager`] -- Facade holding the engine configuration
//! - [`DiffIterable`] -- Token-space alignment produced by the sequence comparator
//! - [`IgnoredRangesInput`] / [`IgnoredRangesOutcome`] -- Comparison with masked byte ranges
//!
//! # Granularities
//!
//! - [`compare_chars`] -- per character, `Raw` (minimal) or `Smart` (word-aware)
//! - [`compare_words`] -- per word, punctuation run and whitespace run
//! - [`compare_lines`] -- per line, with word-level inner fragments

pub mod blocks;
pub mod by_char;
pub mod by_line;
pub mod by_word;
pub mod fragments;
pub mod ignored;
pub mod iterable;
pub mod manager;
pub mod optimizer;
pub mod policy_filter;
pub mod sequence;
pub mod token;
pub mod trim;

pub use blocks::compare_explicit_blocks;
pub use by_char::compare_chars;
pub use by_line::{compare_line_texts, split_lines};
pub use by_word::compare_words;
pub use fragments::{compare_lines, compare_lines_inner, process_blocks, squash};
pub use ignored::{compare_lines_with_ignored_ranges, IgnoredRangesInput, IgnoredRangesOutcome};
pub use iterable::{ChangeBuilder, DiffIterable};
pub use manager::ComparisonManager;
pub use policy_filter::{is_equals, line_key};
pub use sequence::{compare_smart, diff, diff_keys};
