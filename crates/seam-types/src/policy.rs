//! Comparison policies and mode selectors.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Whitespace handling applied while comparing texts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonPolicy {
    /// Literal comparison.
    #[default]
    Default,
    /// Leading and trailing whitespace of every line is insignificant.
    /// Newlines and whitespace inside a line still count.
    TrimWhitespaces,
    /// Every whitespace character, newlines included, is removed before comparing.
    IgnoreWhitespaces,
    /// Runs of whitespace collapse into a single separator; leading and
    /// trailing runs are dropped.
    IgnoreWhitespacesChunks,
}

impl ComparisonPolicy {
    /// All policies, from the strictest to the most lenient on whitespace.
    pub const ALL: [ComparisonPolicy; 4] = [
        ComparisonPolicy::Default,
        ComparisonPolicy::TrimWhitespaces,
        ComparisonPolicy::IgnoreWhitespacesChunks,
        ComparisonPolicy::IgnoreWhitespaces,
    ];

    /// Returns `true` if the policy treats some whitespace as insignificant.
    pub fn ignores_whitespace(&self) -> bool {
        !matches!(self, ComparisonPolicy::Default)
    }
}

impl fmt::Display for ComparisonPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ComparisonPolicy::Default => "default",
            ComparisonPolicy::TrimWhitespaces => "trim-whitespaces",
            ComparisonPolicy::IgnoreWhitespaces => "ignore-whitespaces",
            ComparisonPolicy::IgnoreWhitespacesChunks => "ignore-whitespaces-chunks",
        };
        f.write_str(name)
    }
}

/// Alignment strategy for character-level comparison.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CharComparisonMode {
    /// Plain longest-common-subsequence alignment over all characters.
    Raw,
    /// Non-whitespace characters are aligned first, whitespace fills the gaps,
    /// and pure insertions/deletions are moved to word boundaries.
    #[default]
    Smart,
}

/// Granularity of the highlighting produced for explicit blocks.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HighlightPolicy {
    /// Line fragments only.
    ByLine,
    /// Line fragments with inner word fragments.
    #[default]
    ByWord,
}
