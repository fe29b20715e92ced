//! Reduction - tiered numeric summation.
//!
//! Every tier sums a read-only slice and trades speed against overflow safety
//! or floating-point accuracy:
//! - [`scalar`]: naive sum in the element width (wraps on overflow)
//! - [`widened`]: each element promoted to a wider integer first
//! - [`checked`]: native width, fails with [`OverflowError`] instead of wrapping
//! - [`vectorized`]: independent lanes combined by a fixed reduction tree
//! - [`compensated`]: Neumaier summation for floats
//! - [`exact`]: arbitrary precision (unconditional or lazily promoted) and
//!   fixed-scale decimal
//! - [`parallel`]: any tier as a per-chunk [`Kernel`] over the rayon pool
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use reduction::{checked, compensated, exact, parallel};
//!
//! let total = checked::sum(&[i64::MAX, 1]);
//! assert_eq!(total.unwrap_err().index, 1);
//!
//! assert_eq!(compensated::sum(&[1.0, 1e100, 1.0, -1e100]), 2.0);
//!
//! let big = exact::sum_lazy(&[u64::MAX, u64::MAX]);
//! let widened = parallel::sum_widened(&values, 8)?;
//! ```

pub mod checked;
pub mod compensated;
mod config;
mod element;
mod error;
pub mod exact;
pub mod parallel;
pub mod scalar;
pub mod vectorized;
pub mod widened;

pub use config::{ReduceConfig, DEFAULT_PARALLEL_THRESHOLD};
pub use element::{Float, Integer};
pub use error::{ConfigError, OverflowError, ReduceError};

pub use compensated::NeumaierSum;
pub use exact::decimal::LazyDecimal;
pub use exact::LazySum;
pub use parallel::{Kernel, ParallelReducer};
pub use vectorized::{CheckedPartial, LANES};

pub use num_bigint::BigInt;
pub use rust_decimal::Decimal;
