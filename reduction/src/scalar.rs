//! Naive sequential sums in the element width.
//!
//! The baseline tier. Integer sums wrap on overflow (two's complement, in
//! debug and release alike); float sums accumulate rounding error in order.

use num_traits::{WrappingAdd, Zero};

use crate::element::Integer;

/// Sum integers in sequence order, wrapping on overflow.
#[inline]
pub fn sum<T: Integer>(values: &[T]) -> T {
    values.iter().fold(T::zero(), |acc, v| acc.wrapping_add(v))
}

/// Sum f32 values in sequence order.
#[inline]
pub fn sum_f32(values: &[f32]) -> f32 {
    values.iter().fold(0.0, |acc, &v| acc + v)
}

/// Sum f64 values in sequence order.
#[inline]
pub fn sum_f64(values: &[f64]) -> f64 {
    values.iter().fold(0.0, |acc, &v| acc + v)
}

/// Wrapping sum of the widened elements. Shared by the widened tier and the
/// widened kernels.
#[inline]
pub(crate) fn sum_wide<T: Integer>(values: &[T]) -> T::Wide {
    values
        .iter()
        .fold(T::Wide::zero(), |acc, v| acc.wrapping_add(&v.widen()))
}
