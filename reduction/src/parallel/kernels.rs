//! [`Kernel`] implementations for every tier.

use num_bigint::BigInt;
use num_traits::{WrappingAdd, Zero};
use rust_decimal::Decimal;

use super::Kernel;
use crate::compensated::{self, NeumaierSum};
use crate::element::{Float, Integer};
use crate::error::{ConfigError, ReduceError};
use crate::exact::decimal::{self, LazyDecimal};
use crate::exact::{self, LazySum};
use crate::vectorized::{self, CheckedPartial, LANES};
use crate::{scalar, widened};

/// Wrapping sum in the element width.
#[derive(Debug, Clone, Copy, Default)]
pub struct Naive;

impl<T: Integer> Kernel<T> for Naive {
    type Partial = T;
    type Acc = T;
    type Output = T;
    type Error = ConfigError;

    fn identity(&self) -> T {
        T::zero()
    }

    fn reduce_chunk(&self, chunk: &[T], _offset: usize) -> Result<T, ConfigError> {
        Ok(scalar::sum(chunk))
    }

    fn combine(&self, acc: T, partial: T, _chunk: &[T], _offset: usize) -> Result<T, ConfigError> {
        Ok(acc.wrapping_add(&partial))
    }

    fn finish(&self, acc: T) -> Result<T, ConfigError> {
        Ok(acc)
    }
}

macro_rules! impl_naive_float {
    ($($t:ty => $sum:path),* $(,)?) => {
        $(
            impl Kernel<$t> for Naive {
                type Partial = $t;
                type Acc = $t;
                type Output = $t;
                type Error = ConfigError;

                fn identity(&self) -> $t {
                    0.0
                }

                fn reduce_chunk(&self, chunk: &[$t], _offset: usize) -> Result<$t, ConfigError> {
                    Ok($sum(chunk))
                }

                fn combine(
                    &self,
                    acc: $t,
                    partial: $t,
                    _chunk: &[$t],
                    _offset: usize,
                ) -> Result<$t, ConfigError> {
                    Ok(acc + partial)
                }

                fn finish(&self, acc: $t) -> Result<$t, ConfigError> {
                    Ok(acc)
                }
            }
        )*
    };
}

impl_naive_float!(f32 => scalar::sum_f32, f64 => scalar::sum_f64);

/// Sum in the widened accumulator type.
#[derive(Debug, Clone, Copy, Default)]
pub struct Widened;

/// Widened sum with lane-parallel chunks.
#[derive(Debug, Clone, Copy, Default)]
pub struct VectorWidened;

macro_rules! impl_widened {
    ($kernel:ty, $chunk_sum:path) => {
        impl<T: Integer> Kernel<T> for $kernel {
            type Partial = T::Wide;
            type Acc = T::Wide;
            type Output = T::Wide;
            type Error = ConfigError;

            fn identity(&self) -> T::Wide {
                <T::Wide as Zero>::zero()
            }

            fn reduce_chunk(&self, chunk: &[T], _offset: usize) -> Result<T::Wide, ConfigError> {
                Ok($chunk_sum(chunk))
            }

            fn combine(
                &self,
                acc: T::Wide,
                partial: T::Wide,
                _chunk: &[T],
                _offset: usize,
            ) -> Result<T::Wide, ConfigError> {
                Ok(acc.wrapping_add(&partial))
            }

            fn finish(&self, acc: T::Wide) -> Result<T::Wide, ConfigError> {
                Ok(acc)
            }
        }
    };
}

impl_widened!(Widened, widened::sum);
impl_widened!(VectorWidened, vectorized::sum_widened);

/// Overflow-checked sum in the element width.
///
/// Chunks only compute a [`CheckedPartial`], which cannot fail. The combine
/// phase applies it at once when the running sum plus the chunk's envelope
/// stays in range, and otherwise rescans the chunk from the running sum, so
/// the overflow index and partial match the serial checked sum exactly.
#[derive(Debug, Clone, Copy, Default)]
pub struct Checked;

impl<T: Integer> Kernel<T> for Checked {
    type Partial = CheckedPartial<T::Wide>;
    type Acc = T;
    type Output = T;
    type Error = ReduceError<T>;

    fn identity(&self) -> T {
        T::zero()
    }

    fn reduce_chunk(&self, chunk: &[T], _offset: usize) -> Result<Self::Partial, ReduceError<T>> {
        Ok(vectorized::bounds(chunk))
    }

    fn combine(
        &self,
        acc: T,
        partial: Self::Partial,
        chunk: &[T],
        offset: usize,
    ) -> Result<T, ReduceError<T>> {
        match partial.apply(acc) {
            Some(next) => Ok(next),
            None => Ok(vectorized::sum_checked_from::<T, LANES>(acc, chunk, offset)?),
        }
    }

    fn finish(&self, acc: T) -> Result<T, ReduceError<T>> {
        Ok(acc)
    }
}

/// Neumaier-compensated sum in `f64`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Compensated;

/// Compensated sum with lane-parallel chunks.
#[derive(Debug, Clone, Copy, Default)]
pub struct VectorCompensated;

macro_rules! impl_compensated {
    ($kernel:ty, $chunk_state:path) => {
        impl<T: Float> Kernel<T> for $kernel {
            type Partial = NeumaierSum;
            type Acc = NeumaierSum;
            type Output = f64;
            type Error = ConfigError;

            fn identity(&self) -> NeumaierSum {
                NeumaierSum::new()
            }

            fn reduce_chunk(
                &self,
                chunk: &[T],
                _offset: usize,
            ) -> Result<NeumaierSum, ConfigError> {
                Ok($chunk_state(chunk))
            }

            fn combine(
                &self,
                mut acc: NeumaierSum,
                partial: NeumaierSum,
                _chunk: &[T],
                _offset: usize,
            ) -> Result<NeumaierSum, ConfigError> {
                acc.merge(partial);
                Ok(acc)
            }

            fn finish(&self, acc: NeumaierSum) -> Result<f64, ConfigError> {
                Ok(acc.value())
            }
        }
    };
}

impl_compensated!(Compensated, compensated::state);
impl_compensated!(VectorCompensated, compensated::lanes_state::<T, LANES>);

/// Arbitrary-precision sum of every element.
#[derive(Debug, Clone, Copy, Default)]
pub struct Exact;

impl<T: Integer> Kernel<T> for Exact {
    type Partial = BigInt;
    type Acc = BigInt;
    type Output = BigInt;
    type Error = ConfigError;

    fn identity(&self) -> BigInt {
        BigInt::zero()
    }

    fn reduce_chunk(&self, chunk: &[T], _offset: usize) -> Result<BigInt, ConfigError> {
        Ok(exact::sum(chunk))
    }

    fn combine(
        &self,
        acc: BigInt,
        partial: BigInt,
        _chunk: &[T],
        _offset: usize,
    ) -> Result<BigInt, ConfigError> {
        Ok(acc + partial)
    }

    fn finish(&self, acc: BigInt) -> Result<BigInt, ConfigError> {
        Ok(acc)
    }
}

/// Native sum per chunk, promoted to arbitrary precision on overflow.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExactLazy;

impl<T: Integer> Kernel<T> for ExactLazy {
    type Partial = LazySum<T>;
    type Acc = LazySum<T>;
    type Output = BigInt;
    type Error = ConfigError;

    fn identity(&self) -> LazySum<T> {
        LazySum::new()
    }

    fn reduce_chunk(&self, chunk: &[T], _offset: usize) -> Result<LazySum<T>, ConfigError> {
        let mut acc = LazySum::new();
        acc.add_slice(chunk);
        Ok(acc)
    }

    fn combine(
        &self,
        acc: LazySum<T>,
        partial: LazySum<T>,
        _chunk: &[T],
        _offset: usize,
    ) -> Result<LazySum<T>, ConfigError> {
        Ok(acc.merge(partial))
    }

    fn finish(&self, acc: LazySum<T>) -> Result<BigInt, ConfigError> {
        Ok(acc.into_bigint())
    }
}

/// Fixed-scale decimal sum. See [`crate::exact::decimal`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedDecimal {
    scale: u32,
}

impl FixedDecimal {
    pub fn new(scale: u32) -> Result<Self, ConfigError> {
        decimal::check_scale(scale)?;
        Ok(Self { scale })
    }

    pub fn scale(&self) -> u32 {
        self.scale
    }
}

impl<T: Integer> Kernel<T> for FixedDecimal {
    type Partial = LazyDecimal<T>;
    type Acc = LazyDecimal<T>;
    type Output = Decimal;
    type Error = ConfigError;

    fn identity(&self) -> LazyDecimal<T> {
        LazyDecimal::new()
    }

    fn reduce_chunk(&self, chunk: &[T], offset: usize) -> Result<LazyDecimal<T>, ConfigError> {
        let mut acc = LazyDecimal::new();
        acc.add_slice(chunk, offset)?;
        Ok(acc)
    }

    fn combine(
        &self,
        acc: LazyDecimal<T>,
        partial: LazyDecimal<T>,
        chunk: &[T],
        offset: usize,
    ) -> Result<LazyDecimal<T>, ConfigError> {
        if let Ok(merged) = acc.merge(partial, offset) {
            return Ok(merged);
        }
        // Rescan to find the first element that leaves the range.
        let mut acc = acc;
        acc.add_slice(chunk, offset)?;
        Ok(acc)
    }

    fn finish(&self, acc: LazyDecimal<T>) -> Result<Decimal, ConfigError> {
        acc.into_decimal(self.scale)
    }
}
