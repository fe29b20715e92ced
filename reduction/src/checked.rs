//! Overflow-checked sums in the element width.
//!
//! Every addition goes through `checked_add`; the first one that would leave
//! the representable range stops the sum and reports where it happened.

use crate::element::Integer;
use crate::error::OverflowError;

/// Sum integers in sequence order, failing at the first overflow.
#[inline]
pub fn sum<T: Integer>(values: &[T]) -> Result<T, OverflowError<T>> {
    sum_from(T::zero(), values, 0)
}

/// Continue a checked sum from `start`.
///
/// `offset` is the position of `values[0]` in the whole input and is added to
/// the reported overflow index.
#[inline]
pub fn sum_from<T: Integer>(start: T, values: &[T], offset: usize) -> Result<T, OverflowError<T>> {
    let mut acc = start;
    for (i, &v) in values.iter().enumerate() {
        acc = match acc.checked_add(&v) {
            Some(next) => next,
            None => {
                tracing::debug!(index = offset + i, partial = %acc, "checked sum overflowed");
                return Err(OverflowError {
                    index: offset + i,
                    partial: acc,
                });
            }
        };
    }
    Ok(acc)
}
