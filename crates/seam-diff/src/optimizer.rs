//! Chunk optimizer.
//!
//! A pure insertion or deletion surrounded by repeated tokens can usually be
//! placed at several positions with the same cost: deleting one `x` from
//! `"x x x"` may remove any of them. The optimizer enumerates every valid
//! position of such a change and keeps the best-scored one; ties go to the
//! leftmost position so results are deterministic.

use seam_types::Range;

use crate::iterable::{merge_adjacent, DiffIterable};

/// Which side holds the tokens of a pure change.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    One,
    Two,
}

/// Shift every pure insertion/deletion of `iterable` to its best position.
///
/// `score(side, start, end)` rates the candidate token block `[start, end)`
/// on the side that holds the change. Changes that end up touching a
/// neighbour after the shift are merged with it.
pub fn optimize<K, F>(iterable: &DiffIterable, keys1: &[K], keys2: &[K], mut score: F) -> DiffIterable
where
    K: PartialEq,
    F: FnMut(Side, usize, usize) -> u32,
{
    let changes = iterable.changes();
    let mut result: Vec<Range> = Vec::with_capacity(changes.len());

    for (i, change) in changes.iter().enumerate() {
        let side = match (change.len1() == 0, change.len2() == 0) {
            (false, true) => Side::One,
            (true, false) => Side::Two,
            _ => {
                result.push(*change);
                continue;
            }
        };
        let (keys, start, end, lower, upper) = match side {
            Side::One => (
                keys1,
                change.start1,
                change.end1,
                result.last().map_or(0, |r| r.end1),
                changes.get(i + 1).map_or(iterable.length1(), |r| r.start1),
            ),
            Side::Two => (
                keys2,
                change.start2,
                change.end2,
                result.last().map_or(0, |r| r.end2),
                changes.get(i + 1).map_or(iterable.length2(), |r| r.start2),
            ),
        };

        let (left, right) = shift_limits(keys, start, end, lower, upper);
        if left == 0 && right == 0 {
            result.push(*change);
            continue;
        }

        let mut best_shift = -(left as isize);
        let mut best_score = None;
        for shift in -(left as isize)..=(right as isize) {
            let s = score(side, offset(start, shift), offset(end, shift));
            if best_score.map_or(true, |best| s > best) {
                best_score = Some(s);
                best_shift = shift;
            }
        }

        result.push(Range::new(
            offset(change.start1, best_shift),
            offset(change.end1, best_shift),
            offset(change.start2, best_shift),
            offset(change.end2, best_shift),
        ));
    }

    DiffIterable::new(merge_adjacent(result), iterable.length1(), iterable.length2())
}

/// How far the block `keys[start..end]` can slide left and right while
/// staying inside `[lower, upper)` and keeping the alignment valid.
pub fn shift_limits<K: PartialEq>(
    keys: &[K],
    start: usize,
    end: usize,
    lower: usize,
    upper: usize,
) -> (usize, usize) {
    let mut left = 0;
    while start - left > lower && keys[start - left - 1] == keys[end - left - 1] {
        left += 1;
    }
    let mut right = 0;
    while end + right < upper && keys[start + right] == keys[end + right] {
        right += 1;
    }
    (left, right)
}

fn offset(value: usize, shift: isize) -> usize {
    (value as isize + shift) as usize
}
