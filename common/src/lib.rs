//! Shared utilities for the workspace: CPU feature detection, worker pool
//! partitioning, float comparison helpers and test logging.

pub mod cpu_features;
pub mod float_ext;
pub mod log_setup;
pub mod parallel;
