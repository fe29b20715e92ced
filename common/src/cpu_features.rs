//! CPU feature detection for runtime SIMD dispatch.
//!
//! Detection runs once on first use and is cached. Use these functions instead
//! of calling `is_x86_feature_detected!` in hot paths to avoid repeated CPUID calls.

use std::sync::OnceLock;

/// CPU feature flags relevant to the vectorized reduction kernels.
#[derive(Debug, Clone, Copy, Default)]
pub struct X86Features {
    pub sse2: bool,
    pub sse4_1: bool,
    pub avx: bool,
    pub avx2: bool,
}

static FEATURES: OnceLock<X86Features> = OnceLock::new();

/// Get cached CPU features (detected once on first call).
#[cfg(target_arch = "x86_64")]
#[inline]
pub fn get() -> X86Features {
    *FEATURES.get_or_init(|| {
        let features = X86Features {
            sse2: is_x86_feature_detected!("sse2"),
            sse4_1: is_x86_feature_detected!("sse4.1"),
            avx: is_x86_feature_detected!("avx"),
            avx2: is_x86_feature_detected!("avx2"),
        };
        tracing::debug!(?features, "detected x86 SIMD features");
        features
    })
}

/// Get cached CPU features - all false on non-x86 platforms.
#[cfg(not(target_arch = "x86_64"))]
#[inline]
pub fn get() -> X86Features {
    *FEATURES.get_or_init(X86Features::default)
}

/// Check if SSE2 is available.
#[inline]
pub fn has_sse2() -> bool {
    get().sse2
}

/// Check if SSE4.1 is available.
#[inline]
pub fn has_sse4_1() -> bool {
    get().sse4_1
}

/// Check if AVX2 is available.
///
/// AVX2 implies AVX on every shipping CPU, but both are checked because the
/// float kernels only use AVX instructions.
#[inline]
pub fn has_avx2() -> bool {
    let f = get();
    f.avx && f.avx2
}
