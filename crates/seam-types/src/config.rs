use serde::{Deserialize, Serialize};

/// Tunables for the comparison engine.
///
/// Passed explicitly to every operation that needs it; there is no global
/// configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComparisonConfig {
    /// Lines with at most this many non-whitespace characters are
    /// "unimportant": they are only aligned after all other lines have been
    /// matched.
    pub unimportant_line_char_count: usize,
    /// Inner word fragments are only computed for line fragments spanning at
    /// most this many lines (both sides together).
    pub max_inner_fragment_lines: usize,
    /// When `true`, every intermediate alignment is checked for consistency
    /// and a violation fails the operation.
    pub verify_iterables: bool,
}

impl Default for ComparisonConfig {
    fn default() -> Self {
        Self {
            unimportant_line_char_count: 3,
            max_inner_fragment_lines: 100,
            verify_iterables: false,
        }
    }
}

impl ComparisonConfig {
    /// A configuration that verifies every intermediate result.
    ///
    /// Intended for tests and debugging sessions.
    pub fn verifying() -> Self {
        Self {
            verify_iterables: true,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let c = ComparisonConfig::default();
        assert_eq!(c.unimportant_line_char_count, 3);
        assert_eq!(c.max_inner_fragment_lines, 100);
        assert!(!c.verify_iterables);
        assert!(ComparisonConfig::verifying().verify_iterables);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let c: ComparisonConfig =
            serde_json::from_str(r#"{"unimportant_line_char_count": 0}"#).unwrap();
        assert_eq!(c.unimportant_line_char_count, 0);
        assert_eq!(c.max_inner_fragment_lines, 100);
    }
}
