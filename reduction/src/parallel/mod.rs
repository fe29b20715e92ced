//! Chunked parallel reduction over the rayon pool.
//!
//! Every tier is expressed as a [`Kernel`]: reduce each contiguous chunk to a
//! partial independently, then combine the partials on the calling thread in
//! ascending chunk order. The serial tiers are the same kernel run over one
//! chunk covering the whole input, so a parallel reduction returns what the
//! serial one returns for the exact, widened and checked tiers regardless of
//! the degree.
//!
//! A chunk that fails publishes its index; chunks after it that have not
//! started yet skip their work. The error of the lowest failing chunk is
//! returned.

use std::ops::Range;
use std::sync::atomic::{AtomicUsize, Ordering};

use num_bigint::BigInt;
use rayon::prelude::*;
use rust_decimal::Decimal;

use common::parallel::{part_count, pool_width, split_even};

use crate::config::ReduceConfig;
use crate::element::{Float, Integer};
use crate::error::{ConfigError, ReduceError};

mod kernels;

pub use kernels::{
    Checked, Compensated, Exact, ExactLazy, FixedDecimal, Naive, VectorCompensated, VectorWidened,
    Widened,
};


/// One reduction tier split into a per-chunk phase and an ordered combine
/// phase.
///
/// `offset` is the position of `chunk[0]` in the whole input. Errors carry
/// whole-input indices, so implementations shift chunk-local positions by
/// `offset` before returning them.
pub trait Kernel<T>: Sync {
    /// Result of reducing one chunk, produced on a worker thread.
    type Partial: Send;
    /// Running state of the combine phase.
    type Acc;
    type Output;
    type Error: From<ConfigError> + Send;

    fn identity(&self) -> Self::Acc;

    fn reduce_chunk(&self, chunk: &[T], offset: usize) -> Result<Self::Partial, Self::Error>;

    /// Fold the partial of `chunk` into the state of every chunk before it.
    /// `chunk` is passed again so a kernel can rescan it when the partial
    /// alone cannot decide the result.
    fn combine(
        &self,
        acc: Self::Acc,
        partial: Self::Partial,
        chunk: &[T],
        offset: usize,
    ) -> Result<Self::Acc, Self::Error>;

    fn finish(&self, acc: Self::Acc) -> Result<Self::Output, Self::Error>;

    /// Serial reduction: a single chunk covering all of `values`.
    fn reduce(&self, values: &[T]) -> Result<Self::Output, Self::Error> {
        let partial = self.reduce_chunk(values, 0)?;
        let acc = self.combine(self.identity(), partial, values, 0)?;
        self.finish(acc)
    }
}

/// Splits a reduction into contiguous chunks and runs one rayon task per
/// chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParallelReducer {
    degree: usize,
    threshold: usize,
}

impl ParallelReducer {
    /// Reducer splitting every input into up to `degree` chunks.
    pub fn new(degree: usize) -> Result<Self, ConfigError> {
        if degree == 0 {
            return Err(ConfigError::ZeroDegree);
        }
        Ok(Self {
            degree,
            threshold: 0,
        })
    }

    pub fn from_config(config: &ReduceConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            degree: config.effective_degree(),
            threshold: config.parallel_threshold,
        })
    }

    /// One chunk per worker of the current rayon pool.
    pub fn available() -> Self {
        Self {
            degree: pool_width(),
            threshold: ReduceConfig::default().parallel_threshold,
        }
    }

    /// Inputs shorter than `threshold` are reduced on the calling thread.
    #[must_use]
    pub fn with_threshold(mut self, threshold: usize) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn degree(&self) -> usize {
        self.degree
    }

    /// Number of chunks an input of `len` elements is split into.
    pub fn parts_for(&self, len: usize) -> usize {
        if len < self.threshold {
            1
        } else {
            part_count(len, self.degree)
        }
    }

    pub fn reduce<T, K>(&self, values: &[T], kernel: &K) -> Result<K::Output, K::Error>
    where
        T: Sync,
        K: Kernel<T>,
    {
        let len = values.len();
        let parts = self.parts_for(len);
        if parts == 1 {
            tracing::trace!(len, "reducing on the calling thread");
            return kernel.reduce(values);
        }
        tracing::debug!(len, parts, degree = self.degree, "splitting reduction");

        let ranges: Vec<Range<usize>> = split_even(len, parts).collect();
        let failed_at = AtomicUsize::new(usize::MAX);
        let partials: Vec<Option<Result<K::Partial, K::Error>>> = ranges
            .par_iter()
            .enumerate()
            .map(|(index, range)| {
                if failed_at.load(Ordering::Relaxed) < index {
                    tracing::trace!(chunk = index, "skipping chunk after earlier failure");
                    return None;
                }
                let result = kernel.reduce_chunk(&values[range.clone()], range.start);
                if result.is_err() {
                    tracing::trace!(chunk = index, "chunk failed");
                    failed_at.fetch_min(index, Ordering::Relaxed);
                }
                Some(result)
            })
            .collect();

        let mut acc = kernel.identity();
        for (index, (slot, range)) in partials.into_iter().zip(ranges).enumerate() {
            let partial = match slot {
                Some(result) => result?,
                // Only skipped when an earlier chunk failed, which returned above.
                None => unreachable!("chunk {index} skipped without an earlier failure"),
            };
            let offset = range.start;
            acc = kernel.combine(acc, partial, &values[range], offset)?;
        }
        kernel.finish(acc)
    }
}

/// Widened sum split into `degree` chunks.
pub fn sum_widened<T: Integer>(values: &[T], degree: usize) -> Result<T::Wide, ConfigError> {
    ParallelReducer::new(degree)?.reduce(values, &Widened)
}

/// Widened sum split into `degree` chunks, each summed over vector lanes.
pub fn sum_widened_vectorized<T: Integer>(
    values: &[T],
    degree: usize,
) -> Result<T::Wide, ConfigError> {
    ParallelReducer::new(degree)?.reduce(values, &VectorWidened)
}

/// Checked sum split into `degree` chunks. Reports the same overflow index
/// as the serial checked sum.
pub fn sum_checked<T: Integer>(values: &[T], degree: usize) -> Result<T, ReduceError<T>> {
    ParallelReducer::new(degree)?.reduce(values, &Checked)
}

/// Compensated sum split into `degree` chunks.
pub fn sum_compensated<T: Float>(values: &[T], degree: usize) -> Result<f64, ConfigError> {
    ParallelReducer::new(degree)?.reduce(values, &Compensated)
}

/// Compensated sum split into `degree` chunks, each compensated per lane.
pub fn sum_compensated_vectorized<T: Float>(
    values: &[T],
    degree: usize,
) -> Result<f64, ConfigError> {
    ParallelReducer::new(degree)?.reduce(values, &VectorCompensated)
}

/// Exact sum split into `degree` chunks.
pub fn sum_exact<T: Integer>(values: &[T], degree: usize) -> Result<BigInt, ConfigError> {
    ParallelReducer::new(degree)?.reduce(values, &ExactLazy)
}

/// Fixed-scale decimal sum split into `degree` chunks.
pub fn sum_decimal<T: Integer>(
    values: &[T],
    scale: u32,
    degree: usize,
) -> Result<Decimal, ConfigError> {
    let kernel = FixedDecimal::new(scale)?;
    ParallelReducer::new(degree)?.reduce(values, &kernel)
}
