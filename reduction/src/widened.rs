//! Widened sums: every element is promoted before it is added.
//!
//! Overflow only happens when the sum itself leaves the wide range (more than
//! 2^32 maximal `i32` elements, for example). That case is allowed and not
//! guarded; the wide accumulator wraps.

use crate::element::Integer;
use crate::scalar;

/// Sum integers in sequence order in the widened type.
#[inline]
pub fn sum<T: Integer>(values: &[T]) -> T::Wide {
    scalar::sum_wide(values)
}
