//! Line-offset tables.
//!
//! A text with `n` newline characters has `n + 1` lines; a trailing newline
//! therefore produces a final empty line. Line contents never include the
//! newline itself.

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Maps line numbers to byte offsets of one text.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineOffsets {
    line_starts: Vec<usize>,
    text_len: usize,
}

impl LineOffsets {
    /// Build the table for `text`.
    pub fn from_text(text: &str) -> Self {
        let mut line_starts = vec![0];
        line_starts.extend(
            text.bytes()
                .enumerate()
                .filter(|(_, b)| *b == b'\n')
                .map(|(i, _)| i + 1),
        );
        Self {
            line_starts,
            text_len: text.len(),
        }
    }

    /// Build a table from externally computed line starts.
    ///
    /// The first start must be `0`, starts must be strictly increasing, and
    /// none may exceed `text_len`.
    pub fn from_starts(line_starts: Vec<usize>, text_len: usize) -> Result<Self, TypeError> {
        if line_starts.first() != Some(&0) {
            return Err(TypeError::InvalidLineTable(
                "first line must start at offset 0".into(),
            ));
        }
        if line_starts.windows(2).any(|w| w[0] >= w[1]) {
            return Err(TypeError::InvalidLineTable(
                "line starts must be strictly increasing".into(),
            ));
        }
        if line_starts.last().is_some_and(|&s| s > text_len) {
            return Err(TypeError::InvalidLineTable(format!(
                "line start beyond text length {text_len}"
            )));
        }
        Ok(Self {
            line_starts,
            text_len,
        })
    }

    /// Returns `true` if this table describes exactly the lines of `text`.
    pub fn matches_text(&self, text: &str) -> bool {
        self.text_len == text.len() && *self == Self::from_text(text)
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    pub fn text_len(&self) -> usize {
        self.text_len
    }

    /// Offset of the first byte of `line`.
    pub fn line_start(&self, line: usize) -> usize {
        self.line_starts[line]
    }

    /// Offset just past the content of `line`, excluding its newline.
    pub fn line_end(&self, line: usize) -> usize {
        match self.line_starts.get(line + 1) {
            Some(&next) => next - 1,
            None => self.text_len,
        }
    }

    /// Offset just past `line`, including its newline if it has one.
    pub fn line_end_with_newline(&self, line: usize) -> usize {
        match self.line_starts.get(line + 1) {
            Some(&next) => next,
            None => self.text_len,
        }
    }

    /// The line containing `offset`. Offsets at or past the end of the text
    /// belong to the last line.
    pub fn line_number(&self, offset: usize) -> usize {
        self.line_starts.partition_point(|&s| s <= offset) - 1
    }

    /// Byte offsets covered by the lines `[start, end)`.
    ///
    /// An empty range maps to the start of `start` (the end of the text when
    /// `start` is the line count). A non-empty range that reaches the last
    /// line and does not begin at line 0 takes the preceding newline instead
    /// of its own trailing one, since the last line has none.
    pub fn range_offsets(&self, start: usize, end: usize) -> (usize, usize) {
        let count = self.line_count();
        if start == end {
            let offset = if start < count {
                self.line_start(start)
            } else {
                self.text_len
            };
            (offset, offset)
        } else if end == count && start > 0 {
            (self.line_end(start - 1), self.text_len)
        } else {
            (self.line_start(start), self.line_end_with_newline(end - 1))
        }
    }
}
