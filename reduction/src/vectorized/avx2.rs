//! AVX2 SIMD implementations of lane sums (x86_64).

use std::arch::x86_64::*;

/// Horizontal sum of a 256-bit f32 vector (8 elements).
#[inline]
#[target_feature(enable = "avx2")]
unsafe fn horizontal_sum_256(v: __m256) -> f32 {
    // Extract high 128 bits and add to low 128 bits
    let high = _mm256_extractf128_ps(v, 1);
    let low = _mm256_castps256_ps128(v);
    let sum128 = _mm_add_ps(low, high);

    // Standard 128-bit horizontal sum
    let shuf = _mm_movehdup_ps(sum128);
    let sums = _mm_add_ps(sum128, shuf);
    let shuf = _mm_movehl_ps(sums, sums);
    let sums = _mm_add_ss(sums, shuf);
    _mm_cvtss_f32(sums)
}

/// Horizontal sum of a 256-bit f64 vector (4 elements).
#[inline]
#[target_feature(enable = "avx2")]
unsafe fn horizontal_sum_256d(v: __m256d) -> f64 {
    let high = _mm256_extractf128_pd(v, 1);
    let low = _mm256_castpd256_pd128(v);
    let sum128 = _mm_add_pd(low, high);

    let shuf = _mm_unpackhi_pd(sum128, sum128);
    _mm_cvtsd_f64(_mm_add_sd(sum128, shuf))
}

/// Sum f32 values using AVX2 SIMD.
///
/// # Safety
/// Caller must ensure AVX2 is available.
#[target_feature(enable = "avx2")]
pub unsafe fn sum_f32(values: &[f32]) -> f32 {
    unsafe {
        let mut sum_vec = _mm256_setzero_ps();
        let chunks = values.chunks_exact(8);
        let remainder = chunks.remainder();

        for chunk in chunks {
            let v = _mm256_loadu_ps(chunk.as_ptr());
            sum_vec = _mm256_add_ps(sum_vec, v);
        }

        horizontal_sum_256(sum_vec) + remainder.iter().sum::<f32>()
    }
}

/// Sum f64 values using AVX2 SIMD with two 4-lane accumulators.
///
/// # Safety
/// Caller must ensure AVX2 is available.
#[target_feature(enable = "avx2")]
pub unsafe fn sum_f64(values: &[f64]) -> f64 {
    unsafe {
        let mut acc0 = _mm256_setzero_pd();
        let mut acc1 = _mm256_setzero_pd();
        let chunks = values.chunks_exact(8);
        let remainder = chunks.remainder();

        for chunk in chunks {
            let ptr = chunk.as_ptr();
            acc0 = _mm256_add_pd(acc0, _mm256_loadu_pd(ptr));
            acc1 = _mm256_add_pd(acc1, _mm256_loadu_pd(ptr.add(4)));
        }

        horizontal_sum_256d(_mm256_add_pd(acc0, acc1)) + remainder.iter().sum::<f64>()
    }
}
