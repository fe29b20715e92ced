//! Element types the engine sums over.
//!
//! A closed set: every supported width implements its trait once through a
//! macro, so dispatch is static and there is no runtime type inspection.

use std::fmt::{Debug, Display};

use num_bigint::BigInt;
use num_traits::{PrimInt, WrappingAdd};
use rust_decimal::Decimal;

/// Fixed-width integer element.
pub trait Integer:
    PrimInt + WrappingAdd + Into<BigInt> + Into<Decimal> + Send + Sync + Debug + Display + 'static
{
    /// Accumulator type with enough headroom that sums of realistic lengths
    /// never overflow it.
    type Wide: PrimInt + WrappingAdd + Into<BigInt> + Send + Sync + Debug + Display + 'static;

    fn widen(self) -> Self::Wide;

    /// Converts back to the element width, `None` if out of range.
    fn narrow(wide: Self::Wide) -> Option<Self>;

    /// Adds `self` to an arbitrary-precision total without converting it to
    /// a `BigInt` first.
    fn add_to(self, total: &mut BigInt);
}

macro_rules! impl_integer {
    ($($t:ty => $wide:ty),* $(,)?) => {
        $(
            impl Integer for $t {
                type Wide = $wide;

                #[inline(always)]
                fn widen(self) -> $wide {
                    self as $wide
                }

                #[inline(always)]
                fn narrow(wide: $wide) -> Option<Self> {
                    <$t>::try_from(wide).ok()
                }

                #[inline(always)]
                fn add_to(self, total: &mut BigInt) {
                    *total += self;
                }
            }
        )*
    };
}

impl_integer!(
    i8 => i64,
    i16 => i64,
    i32 => i64,
    i64 => i128,
    u8 => u64,
    u16 => u64,
    u32 => u64,
    u64 => u128,
);

/// Floating-point element. Compensated tiers accumulate in `f64` regardless
/// of the element width.
pub trait Float: Copy + Send + Sync + Debug + 'static {
    fn to_f64(self) -> f64;
}

impl Float for f32 {
    #[inline(always)]
    fn to_f64(self) -> f64 {
        f64::from(self)
    }
}

impl Float for f64 {
    #[inline(always)]
    fn to_f64(self) -> f64 {
        self
    }
}
