//! Exact integer sums in unbounded precision.
//!
//! Two variants with identical results:
//! - [`sum`] adds every element into a `BigInt` from the start.
//! - [`sum_lazy`] stays in the element width while the running sum fits and
//!   moves into a `BigInt` at the first overflow. Once promoted it never
//!   returns to the native path, even if later additions would fit again.
//!
//! [`decimal`] does the same with a fixed-scale decimal target.

use num_bigint::BigInt;
use num_traits::Zero;

use crate::element::Integer;

pub mod decimal;


/// Sum every element into an arbitrary-precision total.
pub fn sum<T: Integer>(values: &[T]) -> BigInt {
    let mut total = BigInt::zero();
    for &v in values {
        v.add_to(&mut total);
    }
    total
}

/// Sum natively until the first overflow, then in arbitrary precision.
pub fn sum_lazy<T: Integer>(values: &[T]) -> BigInt {
    let mut acc = LazySum::new();
    acc.add_slice(values);
    acc.into_bigint()
}

/// Hybrid running sum: a native value until it would overflow, a `BigInt`
/// afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LazySum<T> {
    Native(T),
    Promoted(BigInt),
}

impl<T: Integer> Default for LazySum<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Integer> LazySum<T> {
    pub fn new() -> Self {
        Self::Native(T::zero())
    }

    pub fn is_promoted(&self) -> bool {
        matches!(self, Self::Promoted(_))
    }

    #[inline]
    pub fn add(&mut self, x: T) {
        match self {
            Self::Native(acc) => match acc.checked_add(&x) {
                Some(next) => *acc = next,
                None => {
                    let mut total: BigInt = (*acc).into();
                    x.add_to(&mut total);
                    *self = Self::Promoted(total);
                }
            },
            Self::Promoted(total) => x.add_to(total),
        }
    }

    /// Add a run of elements, keeping the native loop tight until promotion.
    pub fn add_slice(&mut self, values: &[T]) {
        let mut rest = values;
        if let Self::Native(acc) = self {
            let mut native = *acc;
            for (i, &v) in values.iter().enumerate() {
                match native.checked_add(&v) {
                    Some(next) => native = next,
                    None => {
                        tracing::debug!(
                            index = i,
                            partial = %native,
                            "native sum overflowed, promoting to arbitrary precision"
                        );
                        *self = Self::Promoted(native.into());
                        rest = &values[i..];
                        break;
                    }
                }
            }
            if let Self::Native(acc) = self {
                *acc = native;
                return;
            }
        }
        if let Self::Promoted(total) = self {
            for &v in rest {
                v.add_to(total);
            }
        }
    }

    /// Combine with the sum of a later run.
    pub fn merge(self, other: LazySum<T>) -> LazySum<T> {
        match (self, other) {
            (Self::Native(a), Self::Native(b)) => match a.checked_add(&b) {
                Some(sum) => Self::Native(sum),
                None => {
                    let mut total: BigInt = a.into();
                    b.add_to(&mut total);
                    Self::Promoted(total)
                }
            },
            (Self::Native(a), Self::Promoted(b)) | (Self::Promoted(b), Self::Native(a)) => {
                let mut total = b;
                a.add_to(&mut total);
                Self::Promoted(total)
            }
            (Self::Promoted(a), Self::Promoted(b)) => Self::Promoted(a + b),
        }
    }

    pub fn into_bigint(self) -> BigInt {
        match self {
            Self::Native(acc) => acc.into(),
            Self::Promoted(total) => total,
        }
    }
}
