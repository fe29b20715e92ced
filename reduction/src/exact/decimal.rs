//! Exact integer sums into a fixed-scale decimal.
//!
//! Elements are fixed-point values with `scale` fractional digits (amounts in
//! cents with scale 2, for instance). The running sum stays in the element
//! width until it overflows and then continues as a 96-bit
//! [`Decimal`](rust_decimal::Decimal) mantissa. Leaving the decimal range is
//! reported as [`ConfigError::DecimalRange`]: the caller picked a target
//! domain too small for the data.

use rust_decimal::Decimal;

use crate::element::Integer;
use crate::error::ConfigError;

/// Largest scale a `Decimal` can carry.
pub const MAX_DECIMAL_SCALE: u32 = 28;

pub(crate) fn check_scale(scale: u32) -> Result<(), ConfigError> {
    if scale > MAX_DECIMAL_SCALE {
        return Err(ConfigError::DecimalScale {
            scale,
            max: MAX_DECIMAL_SCALE,
        });
    }
    Ok(())
}

/// Sum integer mantissas and return the total with `scale` fractional digits.
pub fn sum<T: Integer>(values: &[T], scale: u32) -> Result<Decimal, ConfigError> {
    check_scale(scale)?;
    let mut acc = LazyDecimal::new();
    acc.add_slice(values, 0)?;
    acc.into_decimal(scale)
}

/// Hybrid running sum: native until it would overflow, `Decimal` afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LazyDecimal<T> {
    Native(T),
    Promoted(Decimal),
}

impl<T: Integer> Default for LazyDecimal<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Integer> LazyDecimal<T> {
    pub fn new() -> Self {
        Self::Native(T::zero())
    }

    pub fn is_promoted(&self) -> bool {
        matches!(self, Self::Promoted(_))
    }

    /// Add a run of elements. `offset` is the position of `values[0]` in the
    /// whole input, used only for error reporting.
    pub fn add_slice(&mut self, values: &[T], offset: usize) -> Result<(), ConfigError> {
        let (mut total, start) = match *self {
            Self::Native(mut native) => {
                let mut promoted_at = None;
                for (i, &v) in values.iter().enumerate() {
                    match native.checked_add(&v) {
                        Some(next) => native = next,
                        None => {
                            promoted_at = Some(i);
                            break;
                        }
                    }
                }
                let Some(i) = promoted_at else {
                    *self = Self::Native(native);
                    return Ok(());
                };
                tracing::debug!(
                    index = offset + i,
                    partial = %native,
                    "native sum overflowed, promoting to decimal"
                );
                let promoted: Decimal = native.into();
                (promoted, i)
            }
            Self::Promoted(total) => (total, 0),
        };
        for (i, &v) in values.iter().enumerate().skip(start) {
            total = total
                .checked_add(v.into())
                .ok_or(ConfigError::DecimalRange { index: offset + i })?;
        }
        *self = Self::Promoted(total);
        Ok(())
    }

    /// Combine with the sum of a later run. `index` is reported if the
    /// combined total leaves the decimal range.
    pub fn merge(self, other: LazyDecimal<T>, index: usize) -> Result<LazyDecimal<T>, ConfigError> {
        if let (Self::Native(a), Self::Native(b)) = (self, other) {
            if let Some(sum) = a.checked_add(&b) {
                return Ok(Self::Native(sum));
            }
        }
        let total = self
            .to_decimal()
            .checked_add(other.to_decimal())
            .ok_or(ConfigError::DecimalRange { index })?;
        Ok(Self::Promoted(total))
    }

    fn to_decimal(self) -> Decimal {
        match self {
            Self::Native(native) => native.into(),
            Self::Promoted(total) => total,
        }
    }

    /// Final total with `scale` fractional digits.
    pub fn into_decimal(self, scale: u32) -> Result<Decimal, ConfigError> {
        let mut total = self.to_decimal();
        total.set_scale(scale).map_err(|_| ConfigError::DecimalScale {
            scale,
            max: MAX_DECIMAL_SCALE,
        })?;
        Ok(total)
    }
}
