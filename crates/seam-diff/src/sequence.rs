//! Sequence alignment: Myers' O(ND) difference algorithm.
//!
//! The implementation is the linear-space variant: it looks for the middle
//! snake of an optimal edit path and recurses on both halves. Common prefixes
//! and suffixes are stripped before every search, which keeps typical inputs
//! (few changes in long texts) close to linear time.
//!
//! On top of the plain alignment, [`compare_smart`] offers the two-step
//! alignment used by every granularity: important tokens are aligned first,
//! and the remaining tokens only fill the gaps between them.

use std::collections::HashMap;
use std::hash::Hash;
use std::ops::{Index, IndexMut};

use seam_types::{CancellationToken, ComparisonResult};
use tracing::trace;

use crate::iterable::{ChangeBuilder, DiffIterable};
use crate::trim::{expand_backward, expand_forward};

/// Interns keys into dense integer ids shared by both sides of a comparison.
#[derive(Debug)]
pub struct Enumerator<K> {
    ids: HashMap<K, u32>,
}

impl<K: Hash + Eq> Enumerator<K> {
    pub fn new() -> Self {
        Self {
            ids: HashMap::new(),
        }
    }

    /// The id of `key`, allocating a new one on first sight.
    pub fn enumerate(&mut self, key: K) -> u32 {
        let next = self.ids.len() as u32;
        *self.ids.entry(key).or_insert(next)
    }
}

impl<K: Hash + Eq> Default for Enumerator<K> {
    fn default() -> Self {
        Self::new()
    }
}

/// Align two sequences of arbitrary hashable keys.
pub fn diff_keys<K: Hash + Eq>(
    keys1: &[K],
    keys2: &[K],
    cancel: &CancellationToken,
) -> ComparisonResult<DiffIterable> {
    let mut enumerator = Enumerator::new();
    let ids1: Vec<u32> = keys1.iter().map(|k| enumerator.enumerate(k)).collect();
    let ids2: Vec<u32> = keys2.iter().map(|k| enumerator.enumerate(k)).collect();
    diff(&ids1, &ids2, cancel)
}

/// Minimal alignment of `a` and `b`.
///
/// Returns maximal change ranges; the gaps between them pair equal elements.
pub fn diff<T: PartialEq>(
    a: &[T],
    b: &[T],
    cancel: &CancellationToken,
) -> ComparisonResult<DiffIterable> {
    cancel.check()?;
    let mut builder = ChangeBuilder::new(a.len(), b.len());
    if !a.is_empty() && !b.is_empty() {
        let max_d = max_d(a.len(), b.len());
        let mut vf = V::new(max_d);
        let mut vb = V::new(max_d);
        let mut search = Search {
            a,
            b,
            vf: &mut vf,
            vb: &mut vb,
            builder: &mut builder,
            cancel,
        };
        search.conquer(0, a.len(), 0, b.len())?;
    }
    Ok(builder.finish())
}

/// Two-step alignment.
///
/// Only tokens flagged as important take part in the first alignment. Every
/// gap between two matched important tokens is then aligned again using all
/// of its tokens. Unimportant tokens (whitespace, short lines) can therefore
/// never pull the alignment of important ones away from its natural place.
pub fn compare_smart<T: PartialEq>(
    keys1: &[T],
    keys2: &[T],
    important1: &[bool],
    important2: &[bool],
    cancel: &CancellationToken,
) -> ComparisonResult<DiffIterable> {
    debug_assert_eq!(keys1.len(), important1.len());
    debug_assert_eq!(keys2.len(), important2.len());

    let big1: Vec<usize> = positions(important1);
    let big2: Vec<usize> = positions(important2);
    if big1.len() == keys1.len() && big2.len() == keys2.len() {
        return diff(keys1, keys2, cancel);
    }

    let big_keys1: Vec<&T> = big1.iter().map(|&i| &keys1[i]).collect();
    let big_keys2: Vec<&T> = big2.iter().map(|&i| &keys2[i]).collect();
    let big_diff = diff(&big_keys1, &big_keys2, cancel)?;
    trace!(
        important1 = big1.len(),
        important2 = big2.len(),
        changes = big_diff.changes().len(),
        "aligned important tokens"
    );

    let mut builder = ChangeBuilder::new(keys1.len(), keys2.len());
    let (mut last1, mut last2) = (0, 0);
    for range in big_diff.unchanged() {
        for k in 0..range.len1() {
            let index1 = big1[range.start1 + k];
            let index2 = big2[range.start2 + k];
            fill_gap(keys1, keys2, (last1, index1), (last2, index2), &mut builder, cancel)?;
            builder.mark_equal(index1, index2, 1);
            last1 = index1 + 1;
            last2 = index2 + 1;
        }
    }
    fill_gap(
        keys1,
        keys2,
        (last1, keys1.len()),
        (last2, keys2.len()),
        &mut builder,
        cancel,
    )?;
    Ok(builder.finish())
}

fn positions(flags: &[bool]) -> Vec<usize> {
    flags
        .iter()
        .enumerate()
        .filter(|(_, &flag)| flag)
        .map(|(i, _)| i)
        .collect()
}

fn fill_gap<T: PartialEq>(
    keys1: &[T],
    keys2: &[T],
    (start1, end1): (usize, usize),
    (start2, end2): (usize, usize),
    builder: &mut ChangeBuilder,
    cancel: &CancellationToken,
) -> ComparisonResult<()> {
    if start1 == end1 || start2 == end2 {
        return Ok(());
    }
    let gap = diff(&keys1[start1..end1], &keys2[start2..end2], cancel)?;
    builder.mark_unchanged_of(&gap, start1, start2);
    Ok(())
}

fn max_d(len1: usize, len2: usize) -> usize {
    (len1 + len2 + 1) / 2 + 1
}

/// Furthest-reaching x coordinates per diagonal `k`, indexed from `-max_d`.
struct V {
    offset: isize,
    v: Vec<usize>,
}

impl V {
    fn new(max_d: usize) -> Self {
        Self {
            offset: max_d as isize,
            v: vec![0; 2 * max_d + 1],
        }
    }
}

impl Index<isize> for V {
    type Output = usize;

    fn index(&self, k: isize) -> &usize {
        &self.v[(k + self.offset) as usize]
    }
}

impl IndexMut<isize> for V {
    fn index_mut(&mut self, k: isize) -> &mut usize {
        &mut self.v[(k + self.offset) as usize]
    }
}

struct Search<'a, 'b, T> {
    a: &'a [T],
    b: &'a [T],
    vf: &'b mut V,
    vb: &'b mut V,
    builder: &'b mut ChangeBuilder,
    cancel: &'b CancellationToken,
}

impl<T: PartialEq> Search<'_, '_, T> {
    fn conquer(
        &mut self,
        mut start1: usize,
        mut end1: usize,
        mut start2: usize,
        mut end2: usize,
    ) -> ComparisonResult<()> {
        let prefix = expand_forward(self.a, self.b, start1, start2, end1, end2);
        self.builder.mark_equal(start1, start2, prefix);
        start1 += prefix;
        start2 += prefix;

        let suffix = expand_backward(self.a, self.b, start1, start2, end1, end2);
        end1 -= suffix;
        end2 -= suffix;

        if start1 < end1 && start2 < end2 {
            if let Some((x, y)) = self.find_middle_snake(start1, end1, start2, end2)? {
                self.conquer(start1, x, start2, y)?;
                self.conquer(x, end1, y, end2)?;
            }
        }

        self.builder.mark_equal(end1, end2, suffix);
        Ok(())
    }

    /// Find a point on an optimal edit path splitting the problem in two.
    fn find_middle_snake(
        &mut self,
        start1: usize,
        end1: usize,
        start2: usize,
        end2: usize,
    ) -> ComparisonResult<Option<(usize, usize)>> {
        let n = end1 - start1;
        let m = end2 - start2;
        let delta = n as isize - m as isize;
        let odd = delta & 1 == 1;
        self.vf[1] = 0;
        self.vb[1] = 0;

        for d in 0..max_d(n, m) as isize {
            self.cancel.check()?;

            for k in (-d..=d).rev().step_by(2) {
                let mut x = if k == -d || (k != d && self.vf[k - 1] < self.vf[k + 1]) {
                    self.vf[k + 1]
                } else {
                    self.vf[k - 1] + 1
                };
                let y = (x as isize - k) as usize;
                let (x0, y0) = (x, y);
                if x < n && y < m {
                    x += expand_forward(self.a, self.b, start1 + x, start2 + y, end1, end2);
                }
                self.vf[k] = x;
                if odd && (k - delta).abs() <= d - 1 && self.vf[k] + self.vb[-(k - delta)] >= n {
                    return Ok(Some((start1 + x0, start2 + y0)));
                }
            }

            for k in (-d..=d).rev().step_by(2) {
                let mut x = if k == -d || (k != d && self.vb[k - 1] < self.vb[k + 1]) {
                    self.vb[k + 1]
                } else {
                    self.vb[k - 1] + 1
                };
                let mut y = (x as isize - k) as usize;
                if x < n && y < m {
                    let advance = expand_backward(
                        self.a,
                        self.b,
                        start1,
                        start2,
                        start1 + n - x,
                        start2 + m - y,
                    );
                    x += advance;
                    y += advance;
                }
                self.vb[k] = x;
                if !odd && (k - delta).abs() <= d && self.vb[k] + self.vf[-(k - delta)] >= n {
                    return Ok(Some((start1 + n - x, start2 + m - y)));
                }
            }
        }

        Ok(None)
    }
}
