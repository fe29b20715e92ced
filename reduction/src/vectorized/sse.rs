//! SSE SIMD implementations of lane sums (x86_64).

use std::arch::x86_64::*;

/// Sum f32 values using SSE4.1 SIMD.
///
/// # Safety
/// Caller must ensure SSE4.1 is available.
#[target_feature(enable = "sse4.1")]
pub unsafe fn sum_f32(values: &[f32]) -> f32 {
    unsafe {
        let mut sum_vec = _mm_setzero_ps();
        let chunks = values.chunks_exact(4);
        let remainder = chunks.remainder();

        for chunk in chunks {
            let v = _mm_loadu_ps(chunk.as_ptr());
            sum_vec = _mm_add_ps(sum_vec, v);
        }

        // Horizontal sum: [a, b, c, d] -> (a + b) + (c + d)
        let shuf = _mm_movehdup_ps(sum_vec); // [b, b, d, d]
        let sums = _mm_add_ps(sum_vec, shuf); // [a+b, b+b, c+d, d+d]
        let shuf = _mm_movehl_ps(sums, sums); // [c+d, d+d, c+d, d+d]
        let sums = _mm_add_ss(sums, shuf); // [a+b+c+d, ...]
        let sum = _mm_cvtss_f32(sums);

        sum + remainder.iter().sum::<f32>()
    }
}

/// Sum f64 values using SSE2 SIMD with two 2-lane accumulators.
///
/// # Safety
/// Caller must ensure SSE2 is available.
#[target_feature(enable = "sse2")]
pub unsafe fn sum_f64(values: &[f64]) -> f64 {
    unsafe {
        let mut acc0 = _mm_setzero_pd();
        let mut acc1 = _mm_setzero_pd();
        let chunks = values.chunks_exact(4);
        let remainder = chunks.remainder();

        for chunk in chunks {
            let ptr = chunk.as_ptr();
            acc0 = _mm_add_pd(acc0, _mm_loadu_pd(ptr));
            acc1 = _mm_add_pd(acc1, _mm_loadu_pd(ptr.add(2)));
        }

        // [a, b] + [c, d] -> [a+c, b+d] -> (a+c) + (b+d)
        let sums = _mm_add_pd(acc0, acc1);
        let high = _mm_unpackhi_pd(sums, sums);
        let sum = _mm_cvtsd_f64(_mm_add_sd(sums, high));

        sum + remainder.iter().sum::<f64>()
    }
}
