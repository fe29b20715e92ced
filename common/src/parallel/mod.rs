//! Static work partitioning for the rayon worker pool.
//!
//! Reductions have uniform per-element cost, so work is split once into
//! contiguous ranges up front instead of relying on work stealing to balance it.

use std::ops::Range;


/// Number of workers in the current rayon pool.
#[inline]
pub fn pool_width() -> usize {
    rayon::current_num_threads()
}

/// Number of non-empty parts `len` elements split into when `degree` parts
/// are requested. Never zero, never more than `len` (except for empty input,
/// which still gets one empty part).
#[inline]
pub fn part_count(len: usize, degree: usize) -> usize {
    degree.clamp(1, len.max(1))
}

/// Range of part `index` when `len` elements are split into `parts` parts.
///
/// All parts hold `len / parts` elements except the last, which also takes
/// the remainder.
///
/// # Panics
///
/// Panics if `parts` is 0 or `index >= parts`.
#[inline]
pub fn part_range(len: usize, parts: usize, index: usize) -> Range<usize> {
    assert!(parts > 0, "parts must be > 0");
    assert!(index < parts, "part index {index} out of range for {parts} parts");

    let size = len / parts;
    let start = index * size;
    let end = if index + 1 == parts { len } else { start + size };
    start..end
}

/// Splits `0..len` into `part_count(len, degree)` contiguous ranges in
/// ascending order.
pub fn split_even(len: usize, degree: usize) -> SplitEven {
    SplitEven {
        len,
        parts: part_count(len, degree),
        next: 0,
    }
}

/// Iterator returned by [`split_even`].
#[derive(Debug, Clone)]
pub struct SplitEven {
    len: usize,
    parts: usize,
    next: usize,
}

impl Iterator for SplitEven {
    type Item = Range<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next == self.parts {
            return None;
        }
        let range = part_range(self.len, self.parts, self.next);
        self.next += 1;
        Some(range)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.parts - self.next;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for SplitEven {}
