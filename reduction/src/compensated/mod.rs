//! Compensated (Neumaier) summation for floats.
//!
//! A running correction term collects the low-order bits every addition
//! rounds away and is added back at the end. Unlike plain Kahan summation
//! the correction is taken from whichever operand is smaller, so a large term
//! followed by its negation does not wipe out the small terms around it:
//! `[1, 1e100, 1, -1e100]` sums to `2`, where a naive loop returns `0`.
//!
//! All sums accumulate in `f64`; `f32` inputs come back in double width.

use crate::element::Float;
use crate::vectorized::{tree_reduce, LANES};


/// Running sum with its Neumaier correction term.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NeumaierSum {
    sum: f64,
    compensation: f64,
}

impl NeumaierSum {
    pub const fn new() -> Self {
        Self {
            sum: 0.0,
            compensation: 0.0,
        }
    }

    #[inline]
    pub fn add(&mut self, x: f64) {
        let t = self.sum + x;
        if self.sum.abs() >= x.abs() {
            self.compensation += (self.sum - t) + x;
        } else {
            self.compensation += (x - t) + self.sum;
        }
        self.sum = t;
    }

    /// Fold another partial state into this one.
    #[inline]
    pub fn merge(&mut self, other: NeumaierSum) {
        self.add(other.sum);
        self.compensation += other.compensation;
    }

    /// Uncompensated running sum.
    pub fn sum(&self) -> f64 {
        self.sum
    }

    pub fn compensation(&self) -> f64 {
        self.compensation
    }

    /// Compensated total. Infinities and NaN pass through unchanged.
    #[inline]
    pub fn value(&self) -> f64 {
        if self.sum.is_finite() {
            self.sum + self.compensation
        } else {
            self.sum
        }
    }
}

impl Extend<f64> for NeumaierSum {
    fn extend<I: IntoIterator<Item = f64>>(&mut self, iter: I) {
        for x in iter {
            self.add(x);
        }
    }
}

impl FromIterator<f64> for NeumaierSum {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        let mut acc = Self::new();
        acc.extend(iter);
        acc
    }
}

/// Compensated state of `values` summed in sequence order.
#[inline]
pub fn state<T: Float>(values: &[T]) -> NeumaierSum {
    values.iter().map(|v| v.to_f64()).collect()
}

/// Compensated sum in sequence order.
#[inline]
pub fn sum<T: Float>(values: &[T]) -> f64 {
    state(values).value()
}

/// Compensated state of `values` over `L` lanes, merged by the lane tree.
pub fn lanes_state<T: Float, const L: usize>(values: &[T]) -> NeumaierSum {
    let mut lanes = [NeumaierSum::new(); L];
    let chunks = values.chunks_exact(L);
    let remainder = chunks.remainder();

    for chunk in chunks {
        for (lane, v) in lanes.iter_mut().zip(chunk) {
            lane.add(v.to_f64());
        }
    }
    for (lane, v) in lanes.iter_mut().zip(remainder) {
        lane.add(v.to_f64());
    }

    tree_reduce(lanes, |mut a, b| {
        a.merge(b);
        a
    })
}

/// Compensated sum over [`LANES`] lanes.
///
/// Within the compensated error bound of [`sum`], but not bit-identical to it.
#[inline]
pub fn sum_lanes<T: Float>(values: &[T]) -> f64 {
    lanes_state::<T, LANES>(values).value()
}
