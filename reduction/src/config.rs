//! Reduction configuration.
//!
//! Gathers the tuning knobs of the parallel and decimal tiers in one
//! serializable type so embedding applications can load them from their own
//! settings files.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::exact::decimal::MAX_DECIMAL_SCALE;

/// Inputs shorter than this are reduced on the calling thread by default.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 4096;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReduceConfig {
    /// Number of chunks for parallel tiers. `None` uses the rayon pool width.
    pub degree: Option<usize>,
    /// Fractional digits of the fixed-scale decimal tier (0 = integers).
    pub decimal_scale: u32,
    /// Inputs shorter than this run as a single chunk.
    pub parallel_threshold: usize,
}

impl Default for ReduceConfig {
    fn default() -> Self {
        Self {
            degree: None,
            decimal_scale: 0,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

impl ReduceConfig {
    /// Single chunk, everything on the calling thread.
    pub fn serial() -> Self {
        Self {
            degree: Some(1),
            ..Default::default()
        }
    }

    /// Fixed degree with no small-input cutoff, so every call is split.
    pub fn with_degree(degree: usize) -> Self {
        Self {
            degree: Some(degree),
            parallel_threshold: 0,
            ..Default::default()
        }
    }

    /// Set the decimal scale.
    #[must_use]
    pub fn with_decimal_scale(mut self, scale: u32) -> Self {
        self.decimal_scale = scale;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.degree == Some(0) {
            return Err(ConfigError::ZeroDegree);
        }
        if self.decimal_scale > MAX_DECIMAL_SCALE {
            return Err(ConfigError::DecimalScale {
                scale: self.decimal_scale,
                max: MAX_DECIMAL_SCALE,
            });
        }
        Ok(())
    }

    /// Requested degree, falling back to the rayon pool width.
    pub fn effective_degree(&self) -> usize {
        self.degree.unwrap_or_else(common::parallel::pool_width)
    }
}
