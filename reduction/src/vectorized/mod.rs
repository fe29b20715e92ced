//! Lane-parallel sums.
//!
//! Element `i` goes to lane `i % L`, every lane keeps its own running
//! accumulator, and the lanes are folded by a fixed pairwise tree. The lane
//! count only affects speed: integer results are identical for every `L`
//! because widened addition is exact. Float results round differently from a
//! sequential sum and from one dispatch path to another, so they vary with the
//! host CPU; use [`crate::compensated`] when accuracy matters.

use num_traits::{WrappingAdd, Zero};

use crate::checked;
use crate::element::Integer;
use crate::error::OverflowError;

pub mod portable;

#[cfg(target_arch = "aarch64")]
mod neon;

#[cfg(target_arch = "x86_64")]
mod avx2;

#[cfg(target_arch = "x86_64")]
mod sse;

#[cfg(test)]
mod tests;

/// Default number of integer lanes.
pub const LANES: usize = 8;

/// Rows of `L` elements screened at once by the checked tier.
const SCREEN_ROWS: usize = 64;

/// Fold lanes pairwise: with `h = ceil(width / 2)`, lane `j` absorbs lane
/// `j + h`, until one lane is left. The order is fixed for a given `L`.
#[inline]
pub(crate) fn tree_reduce<A: Copy, const L: usize>(
    mut lanes: [A; L],
    combine: impl Fn(A, A) -> A,
) -> A {
    const { assert!(L > 0, "at least one lane is required") };

    let mut width = L;
    while width > 1 {
        let half = width.div_ceil(2);
        for i in 0..width - half {
            lanes[i] = combine(lanes[i], lanes[i + half]);
        }
        width = half;
    }
    lanes[0]
}

/// Widened sum over [`LANES`] lanes.
#[inline]
pub fn sum_widened<T: Integer>(values: &[T]) -> T::Wide {
    sum_widened_lanes::<T, LANES>(values)
}

/// Widened sum over `L` lanes.
pub fn sum_widened_lanes<T: Integer, const L: usize>(values: &[T]) -> T::Wide {
    let mut lanes = [T::Wide::zero(); L];
    let chunks = values.chunks_exact(L);
    let remainder = chunks.remainder();

    for chunk in chunks {
        for (lane, v) in lanes.iter_mut().zip(chunk) {
            *lane = lane.wrapping_add(&v.widen());
        }
    }
    for (lane, v) in lanes.iter_mut().zip(remainder) {
        *lane = lane.wrapping_add(&v.widen());
    }

    tree_reduce(lanes, |a, b| a.wrapping_add(&b))
}

/// Widened sum of a run together with the sums of its positive and negative
/// elements.
///
/// Every running prefix of the run lies in `[negative, positive]`, which lets
/// a checked sum skip element-by-element checks when the envelope fits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckedPartial<W> {
    pub sum: W,
    pub positive: W,
    pub negative: W,
}

impl<W: Zero> CheckedPartial<W> {
    pub fn zero() -> Self {
        Self {
            sum: W::zero(),
            positive: W::zero(),
            negative: W::zero(),
        }
    }
}

impl<W: Copy + WrappingAdd> CheckedPartial<W> {
    #[inline]
    fn merge(self, other: Self) -> Self {
        Self {
            sum: self.sum.wrapping_add(&other.sum),
            positive: self.positive.wrapping_add(&other.positive),
            negative: self.negative.wrapping_add(&other.negative),
        }
    }
}

impl<W: num_traits::PrimInt> CheckedPartial<W> {
    /// `start + sum` when no running prefix started at `start` can leave the
    /// range of `T`; `None` when the run has to be checked element by element.
    #[inline]
    pub fn apply<T: Integer<Wide = W>>(&self, start: T) -> Option<T> {
        let start = start.widen();
        let max = T::max_value().widen();
        let min = T::min_value().widen();

        let high = start.checked_add(&self.positive)?;
        let low = start.checked_add(&self.negative)?;
        if high > max || low < min {
            return None;
        }
        T::narrow(start.checked_add(&self.sum)?)
    }
}

/// [`CheckedPartial`] of `values` over [`LANES`] lanes.
#[inline]
pub fn bounds<T: Integer>(values: &[T]) -> CheckedPartial<T::Wide> {
    bounds_lanes::<T, LANES>(values)
}

/// [`CheckedPartial`] of `values` over `L` lanes.
pub fn bounds_lanes<T: Integer, const L: usize>(values: &[T]) -> CheckedPartial<T::Wide> {
    let zero = T::Wide::zero();
    let mut positive = [zero; L];
    let mut negative = [zero; L];

    let chunks = values.chunks_exact(L);
    let remainder = chunks.remainder();

    for chunk in chunks {
        for ((p, n), v) in positive.iter_mut().zip(negative.iter_mut()).zip(chunk) {
            let w = v.widen();
            *p = p.wrapping_add(&w.max(zero));
            *n = n.wrapping_add(&w.min(zero));
        }
    }
    for ((p, n), v) in positive.iter_mut().zip(negative.iter_mut()).zip(remainder) {
        let w = v.widen();
        *p = p.wrapping_add(&w.max(zero));
        *n = n.wrapping_add(&w.min(zero));
    }

    let lanes: [CheckedPartial<T::Wide>; L] = std::array::from_fn(|i| CheckedPartial {
        sum: positive[i].wrapping_add(&negative[i]),
        positive: positive[i],
        negative: negative[i],
    });
    tree_reduce(lanes, CheckedPartial::merge)
}

/// Checked sum over [`LANES`] lanes.
///
/// Reports the same result and the same overflow index as
/// [`checked::sum`]: blocks whose prefix envelope fits the native range are
/// applied at once, any other block is re-checked element by element.
#[inline]
pub fn sum_checked<T: Integer>(values: &[T]) -> Result<T, OverflowError<T>> {
    sum_checked_from::<T, LANES>(T::zero(), values, 0)
}

/// Checked sum over `L` lanes.
#[inline]
pub fn sum_checked_lanes<T: Integer, const L: usize>(values: &[T]) -> Result<T, OverflowError<T>> {
    sum_checked_from::<T, L>(T::zero(), values, 0)
}

/// Continue a lane-screened checked sum from `start`; `offset` is the position
/// of `values[0]` in the whole input.
pub(crate) fn sum_checked_from<T: Integer, const L: usize>(
    start: T,
    values: &[T],
    offset: usize,
) -> Result<T, OverflowError<T>> {
    let block_len = L * SCREEN_ROWS;
    let mut acc = start;

    for (block_index, block) in values.chunks(block_len).enumerate() {
        acc = match bounds_lanes::<T, L>(block).apply(acc) {
            Some(next) => next,
            None => checked::sum_from(acc, block, offset + block_index * block_len)?,
        };
    }
    Ok(acc)
}

/// Sum f32 values using SIMD when available.
///
/// The result depends on the host CPU. AVX2, SSE, NEON and portable lanes
/// each combine their lanes in a different order, and the SIMD paths add the
/// tail sequentially after the lane fold, so the same input can round
/// differently across machines. It is not bit-identical to
/// [`crate::scalar::sum_f32`] either.
pub fn sum_f32(values: &[f32]) -> f32 {
    #[cfg(target_arch = "aarch64")]
    {
        if values.len() >= 4 {
            return unsafe { neon::sum_f32(values) };
        }
    }
    #[cfg(target_arch = "x86_64")]
    {
        if values.len() >= 8 && common::cpu_features::has_avx2() {
            return unsafe { avx2::sum_f32(values) };
        }
        if values.len() >= 4 && common::cpu_features::has_sse4_1() {
            return unsafe { sse::sum_f32(values) };
        }
    }
    portable::sum_lanes::<f32, LANES>(values)
}

/// Sum f64 values using SIMD when available.
///
/// The result depends on the host CPU. AVX2, SSE, NEON and portable lanes
/// each combine their lanes in a different order, and the SIMD paths add the
/// tail sequentially after the lane fold, so the same input can round
/// differently across machines. It is not bit-identical to
/// [`crate::scalar::sum_f64`] either.
pub fn sum_f64(values: &[f64]) -> f64 {
    #[cfg(target_arch = "aarch64")]
    {
        if values.len() >= 4 {
            return unsafe { neon::sum_f64(values) };
        }
    }
    #[cfg(target_arch = "x86_64")]
    {
        if values.len() >= 8 && common::cpu_features::has_avx2() {
            return unsafe { avx2::sum_f64(values) };
        }
        if values.len() >= 4 && common::cpu_features::has_sse2() {
            return unsafe { sse::sum_f64(values) };
        }
    }
    portable::sum_lanes::<f64, LANES>(values)
}
