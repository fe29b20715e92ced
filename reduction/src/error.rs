//! Error types for reduction operations.
//!
//! Floating-point and arbitrary-precision tiers have no data errors. Overflow
//! only exists for the checked tiers and is always fatal to the call: the
//! engine never falls back to a safer tier on its own.

use thiserror::Error;

/// The running native-width sum could not absorb the element at `index`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("sum overflowed at index {index}, last representable running sum was {partial}")]
pub struct OverflowError<T> {
    /// Position in the whole input of the element that overflowed.
    pub index: usize,
    /// Running sum of all elements before `index`.
    pub partial: T,
}

impl<T> OverflowError<T> {
    /// Shifts `index` from chunk-local to whole-input coordinates.
    #[must_use]
    pub fn offset(self, by: usize) -> Self {
        Self {
            index: self.index + by,
            partial: self.partial,
        }
    }
}

/// Invalid reduction setup. Never retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Degree of parallelism must be at least 1")]
    ZeroDegree,

    #[error("Decimal scale {scale} exceeds the maximum of {max}")]
    DecimalScale { scale: u32, max: u32 },

    #[error("Decimal sum exceeds the 96-bit decimal range at index {index}")]
    DecimalRange { index: usize },
}

/// Failure of a checked reduction that also takes configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReduceError<T> {
    #[error("{0}")]
    Overflow(OverflowError<T>),

    #[error("{0}")]
    Config(ConfigError),
}

impl<T> From<OverflowError<T>> for ReduceError<T> {
    fn from(err: OverflowError<T>) -> Self {
        Self::Overflow(err)
    }
}

impl<T> From<ConfigError> for ReduceError<T> {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

impl<T> ReduceError<T> {
    /// The overflow signal, if this is one.
    pub fn overflow(&self) -> Option<&OverflowError<T>> {
        match self {
            Self::Overflow(err) => Some(err),
            Self::Config(_) => None,
        }
    }
}
