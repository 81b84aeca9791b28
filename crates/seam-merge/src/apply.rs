//! Producing merged text from a line merge.

use seam_types::{CancellationToken, ComparisonConfig, ComparisonPolicy};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::MergeResult;
use crate::lines::{merge_split_lines, MergeLineFragment, MergeLines};
use crate::resolver::{try_greedy_resolve, try_resolve};

/// How [`apply_merge`] treats conflicts.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MergeOptions {
    /// Resolve conflicts with [`try_greedy_resolve`] instead of [`try_resolve`].
    pub greedy: bool,
    pub policy: ComparisonPolicy,
    pub left_label: String,
    pub base_label: String,
    pub right_label: String,
}

impl Default for MergeOptions {
    fn default() -> Self {
        Self {
            greedy: false,
            policy: ComparisonPolicy::Default,
            left_label: "left".to_string(),
            base_label: "base".to_string(),
            right_label: "right".to_string(),
        }
    }
}

/// The merged text and what it took to produce it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeOutcome {
    pub text: String,
    /// Conflicts written out with markers.
    pub conflicts: usize,
    /// Conflicts merged by the word-level resolver.
    pub auto_resolved: usize,
}

impl MergeOutcome {
    pub fn is_clean(&self) -> bool {
        self.conflicts == 0
    }
}

/// Merge `left` and `right` against their common ancestor `base`.
///
/// Unchanged lines come from `left`. One-sided and identical changes are
/// applied, conflicts are resolved where possible and otherwise written as
/// diff3-style marker blocks.
pub fn apply_merge(
    left: &str,
    base: &str,
    right: &str,
    options: &MergeOptions,
    config: &ComparisonConfig,
    cancel: &CancellationToken,
) -> MergeResult<MergeOutcome> {
    let lines = MergeLines::new(left, base, right);
    let fragments = merge_split_lines(&lines, options.policy, config, cancel)?;

    let mut out: Vec<String> = Vec::with_capacity(lines.left.len());
    let mut conflicts = 0;
    let mut auto_resolved = 0;
    let mut left_pos = 0;
    for fragment in &fragments {
        let range = &fragment.range;
        out.extend(lines.left[left_pos..range.start1].iter().map(|l| l.to_string()));
        left_pos = range.end1;

        if !fragment.conflict_type.is_conflict() {
            out.extend(changed_lines(&lines, fragment).iter().map(|l| l.to_string()));
            continue;
        }
        let left_text = lines.left_of(range).join("\n");
        let base_text = lines.base_of(range).join("\n");
        let right_text = lines.right_of(range).join("\n");
        let resolved = if options.greedy {
            try_greedy_resolve(&left_text, &base_text, &right_text, cancel)?
        } else {
            try_resolve(&left_text, &base_text, &right_text, cancel)?
        };
        match resolved {
            Some(text) => {
                auto_resolved += 1;
                out.extend(resolved_lines(&text, lines.left_of(range), lines.right_of(range)));
            }
            None => {
                conflicts += 1;
                write_markers(&mut out, &lines, fragment, options);
            }
        }
    }
    out.extend(lines.left[left_pos..].iter().map(|l| l.to_string()));

    if conflicts > 0 {
        info!(conflicts, auto_resolved, "merge finished with conflicts");
    } else {
        debug!(auto_resolved, fragments = fragments.len(), "merge finished");
    }
    Ok(MergeOutcome {
        text: out.join("\n"),
        conflicts,
        auto_resolved,
    })
}

fn changed_lines<'a, 'b>(lines: &'b MergeLines<'a>, fragment: &MergeLineFragment) -> &'b [&'a str] {
    let kind = fragment.conflict_type;
    if kind.right_changed && !kind.left_changed {
        lines.right_of(&fragment.range)
    } else {
        lines.left_of(&fragment.range)
    }
}

/// Lines of a resolved conflict. A resolution equal to one side keeps that
/// side's lines, so zero lines and one empty line stay distinct.
fn resolved_lines(text: &str, left: &[&str], right: &[&str]) -> Vec<String> {
    let side = match (left.join("\n") == text, right.join("\n") == text) {
        (true, true) if right.len() > left.len() => right,
        (true, _) => left,
        (false, true) => right,
        (false, false) => return text.split('\n').map(str::to_string).collect(),
    };
    side.iter().map(|l| l.to_string()).collect()
}

fn write_markers(out: &mut Vec<String>, lines: &MergeLines<'_>, fragment: &MergeLineFragment, options: &MergeOptions) {
    let range = &fragment.range;
    out.push(format!("<<<<<<< {}", options.left_label));
    out.extend(lines.left_of(range).iter().map(|l| l.to_string()));
    out.push(format!("||||||| {}", options.base_label));
    out.extend(lines.base_of(range).iter().map(|l| l.to_string()));
    out.push("=======".to_string());
    out.extend(lines.right_of(range).iter().map(|l| l.to_string()));
    out.push(format!(">>>>>>> {}", options.right_label));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apply(left: &str, base: &str, right: &str, options: &MergeOptions) -> MergeOutcome {
        apply_merge(
            left,
            base,
            right,
            options,
            &ComparisonConfig::verifying(),
            &CancellationToken::new(),
        )
        .unwrap()
    }

    #[test]
    fn applies_changes_from_both_sides() {
        let outcome = apply("a\nB\nc\nd\n", "a\nb\nc\nd\n", "a\nb\nc\nD\n", &MergeOptions::default());
        assert_eq!(outcome.text, "a\nB\nc\nD\n");
        assert!(outcome.is_clean());
        assert_eq!(outcome.auto_resolved, 0);
    }

    #[test]
    fn deletions_and_insertions() {
        let outcome = apply("a\nc", "a\nb\nc", "a\nb\nc\nd", &MergeOptions::default());
        assert_eq!(outcome.text, "a\nc\nd");
    }

    #[test]
    fn unresolvable_conflict_gets_markers() {
        let options = MergeOptions {
            left_label: "ours".to_string(),
            right_label: "theirs".to_string(),
            ..MergeOptions::default()
        };
        let outcome = apply("a\nX\nc", "a\nb\nc", "a\nY\nc", &options);
        assert_eq!(
            outcome.text,
            "a\n<<<<<<< ours\nX\n||||||| base\nb\n=======\nY\n>>>>>>> theirs\nc"
        );
        assert_eq!(outcome.conflicts, 1);
        assert!(!outcome.is_clean());
    }

    #[test]
    fn word_level_conflict_is_resolved() {
        let outcome = apply(
            "one 2 three\nend",
            "one two three\nend",
            "one two 3\nend",
            &MergeOptions::default(),
        );
        assert_eq!(outcome.text, "one 2 3\nend");
        assert_eq!(outcome.auto_resolved, 1);
        assert!(outcome.is_clean());
    }

    #[test]
    fn resolved_blank_line_is_kept() {
        let outcome = apply("a\nc", "a\nb\nc", "a\n\nc", &MergeOptions::default());
        assert_eq!(outcome.text, "a\n\nc");
        assert_eq!(outcome.auto_resolved, 1);

        let outcome = apply("a\n\nc", "a\nb\nc", "a\nc", &MergeOptions::default());
        assert_eq!(outcome.text, "a\n\nc");
    }

    #[test]
    fn resolved_lines_follow_the_matching_side() {
        assert!(resolved_lines("", &[], &[]).is_empty());
        assert_eq!(resolved_lines("", &[], &[""]), vec![""]);
        assert_eq!(resolved_lines("", &[""], &[]), vec![""]);
        assert_eq!(resolved_lines("x\ny", &["x", "y"], &["z"]), vec!["x", "y"]);
        assert_eq!(resolved_lines("x y", &["x"], &["y"]), vec!["x y"]);
    }

    #[test]
    fn greedy_option_resolves_touching_changes() {
        let simple = apply("x x", "x X x", "x X Y x", &MergeOptions::default());
        assert_eq!(simple.conflicts, 1);

        let greedy = MergeOptions {
            greedy: true,
            ..MergeOptions::default()
        };
        let outcome = apply("x x", "x X x", "x X Y x", &greedy);
        assert_eq!(outcome.text, "x Y x");
        assert_eq!(outcome.auto_resolved, 1);
    }

    #[test]
    fn options_load_with_defaults() {
        let options: MergeOptions = serde_json::from_str(r#"{"greedy":true}"#).unwrap();
        assert!(options.greedy);
        assert_eq!(options.base_label, "base");
    }
}
