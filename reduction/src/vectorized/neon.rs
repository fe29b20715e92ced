//! NEON SIMD implementations of lane sums (aarch64).

use std::arch::aarch64::*;

/// Sum f32 values using NEON SIMD.
///
/// # Safety
/// Caller must ensure NEON is available (always true on aarch64).
#[target_feature(enable = "neon")]
pub unsafe fn sum_f32(values: &[f32]) -> f32 {
    unsafe {
        let mut acc0 = vdupq_n_f32(0.0);
        let mut acc1 = vdupq_n_f32(0.0);
        let chunks = values.chunks_exact(8);
        let remainder = chunks.remainder();

        for chunk in chunks {
            let ptr = chunk.as_ptr();
            acc0 = vaddq_f32(acc0, vld1q_f32(ptr));
            acc1 = vaddq_f32(acc1, vld1q_f32(ptr.add(4)));
        }

        // Pairwise across-vector add
        vaddvq_f32(vaddq_f32(acc0, acc1)) + remainder.iter().sum::<f32>()
    }
}

/// Sum f64 values using NEON SIMD.
///
/// # Safety
/// Caller must ensure NEON is available (always true on aarch64).
#[target_feature(enable = "neon")]
pub unsafe fn sum_f64(values: &[f64]) -> f64 {
    unsafe {
        let mut acc0 = vdupq_n_f64(0.0);
        let mut acc1 = vdupq_n_f64(0.0);
        let chunks = values.chunks_exact(4);
        let remainder = chunks.remainder();

        for chunk in chunks {
            let ptr = chunk.as_ptr();
            acc0 = vaddq_f64(acc0, vld1q_f64(ptr));
            acc1 = vaddq_f64(acc1, vld1q_f64(ptr.add(2)));
        }

        vaddvq_f64(vaddq_f64(acc0, acc1)) + remainder.iter().sum::<f64>()
    }
}
