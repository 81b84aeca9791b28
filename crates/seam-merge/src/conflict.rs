use std::fmt;

use serde::{Deserialize, Serialize};

/// What happened to a merge range relative to the base.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    Inserted,
    Deleted,
    Modified,
    Conflict,
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ChangeKind::Inserted => "inserted",
            ChangeKind::Deleted => "deleted",
            ChangeKind::Modified => "modified",
            ChangeKind::Conflict => "conflict",
        };
        f.write_str(name)
    }
}

/// Classification of one merge range.
///
/// For non-conflicting ranges `left_changed`/`right_changed` tell which
/// side carries the change; both are set when the sides agree.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MergeConflictType {
    pub kind: ChangeKind,
    pub left_changed: bool,
    pub right_changed: bool,
    /// A conflict that the word-level resolver can merge automatically.
    pub resolvable: bool,
}

impl MergeConflictType {
    pub fn change(kind: ChangeKind, left_changed: bool, right_changed: bool) -> Self {
        Self {
            kind,
            left_changed,
            right_changed,
            resolvable: false,
        }
    }

    pub fn conflict(resolvable: bool) -> Self {
        Self {
            kind: ChangeKind::Conflict,
            left_changed: true,
            right_changed: true,
            resolvable,
        }
    }

    pub fn is_conflict(&self) -> bool {
        self.kind == ChangeKind::Conflict
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conflicts_change_both_sides() {
        let conflict = MergeConflictType::conflict(true);
        assert!(conflict.is_conflict());
        assert!(conflict.left_changed && conflict.right_changed);
        assert!(conflict.resolvable);

        let change = MergeConflictType::change(ChangeKind::Deleted, false, true);
        assert!(!change.is_conflict());
        assert!(!change.resolvable);
    }

    #[test]
    fn kinds_serialize_in_snake_case() {
        let json = serde_json::to_string(&MergeConflictType::change(ChangeKind::Inserted, true, false)).unwrap();
        assert_eq!(
            json,
            r#"{"kind":"inserted","left_changed":true,"right_changed":false,"resolvable":false}"#
        );
        assert_eq!(ChangeKind::Modified.to_string(), "modified");
    }
}
