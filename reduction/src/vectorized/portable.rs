//! Portable lane implementation used when no SIMD extension is available.
//!
//! Written as independent lane arrays so the compiler can keep them in
//! vector registers on targets without an explicit kernel.

use std::ops::Add;

use super::tree_reduce;

/// Sum floats over `L` independent lanes folded by the lane tree.
pub fn sum_lanes<F, const L: usize>(values: &[F]) -> F
where
    F: Copy + Default + Add<Output = F>,
{
    let mut lanes = [F::default(); L];
    let chunks = values.chunks_exact(L);
    let remainder = chunks.remainder();

    for chunk in chunks {
        for (lane, &v) in lanes.iter_mut().zip(chunk) {
            *lane = *lane + v;
        }
    }
    for (lane, &v) in lanes.iter_mut().zip(remainder) {
        *lane = *lane + v;
    }

    tree_reduce(lanes, |a, b| a + b)
}
