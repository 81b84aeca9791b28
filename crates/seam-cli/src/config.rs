use std::path::Path;

use anyhow::Context;
use seam_merge::MergeOptions;
use seam_types::ComparisonConfig;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Settings read from `--config`.
///
/// ```toml
/// [comparison]
/// unimportant_line_char_count = 3
/// max_inner_fragment_lines = 100
///
/// [merge]
/// greedy = false
/// policy = "trim_whitespaces"
/// left_label = "ours"
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub comparison: ComparisonConfig,
    pub merge: MergeOptions,
}

impl Settings {
    /// Built-in defaults when `path` is `None`.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let settings: Settings = toml::from_str(&contents)
            .with_context(|| format!("parsing config {}", path.display()))?;
        debug!(path = %path.display(), ?settings, "loaded configuration");
        Ok(settings)
    }
}
