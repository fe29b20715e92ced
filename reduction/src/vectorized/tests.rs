//! Tests for lane sums.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::*;
use crate::{checked, widened};

fn random_i64(len: usize, seed: u64) -> Vec<i64> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..len).map(|_| rng.random::<i64>()).collect()
}

// ---------------------------------------------------------------------------
// tree_reduce
// ---------------------------------------------------------------------------

#[test]
fn test_tree_reduce_order_power_of_two() {
    // Non-commutative fold exposes the shape: ((1,3),(2,4)).
    let folded = tree_reduce([1u64, 2, 3, 4], |a, b| a * 100 + b);
    assert_eq!(folded, (1 * 100 + 3) * 100 + (2 * 100 + 4));
}

#[test]
fn test_tree_reduce_odd_width() {
    assert_eq!(tree_reduce([1u32, 2, 3, 4, 5], |a, b| a + b), 15);
    assert_eq!(tree_reduce([7i64], |a, b| a + b), 7);
}

// ---------------------------------------------------------------------------
// sum_widened
// ---------------------------------------------------------------------------

#[test]
fn test_sum_widened_matches_sequential() {
    for len in [0, 1, 7, 8, 9, 63, 64, 65, 1000] {
        let values = random_i64(len, len as u64);
        assert_eq!(sum_widened(&values), widened::sum(&values), "len={len}");
    }
}

#[test]
fn test_sum_widened_lane_count_does_not_change_result() {
    let values = random_i64(777, 11);
    let expected = widened::sum(&values);
    assert_eq!(sum_widened_lanes::<i64, 1>(&values), expected);
    assert_eq!(sum_widened_lanes::<i64, 2>(&values), expected);
    assert_eq!(sum_widened_lanes::<i64, 3>(&values), expected);
    assert_eq!(sum_widened_lanes::<i64, 4>(&values), expected);
    assert_eq!(sum_widened_lanes::<i64, 16>(&values), expected);
}

#[test]
fn test_sum_widened_small_types() {
    let values = vec![u8::MAX; 10_000];
    assert_eq!(sum_widened(&values), 2_550_000u64);
    let values = vec![i16::MIN; 10_000];
    assert_eq!(sum_widened(&values), -327_680_000i64);
}

// ---------------------------------------------------------------------------
// bounds
// ---------------------------------------------------------------------------

#[test]
fn test_bounds_splits_signs() {
    let partial = bounds(&[5i32, -3, 10, -20, 0]);
    assert_eq!(
        partial,
        CheckedPartial {
            sum: -8,
            positive: 15,
            negative: -23,
        }
    );
}

#[test]
fn test_bounds_unsigned_has_no_negative_part() {
    let partial = bounds(&[1u64, 2, 3]);
    assert_eq!(partial.negative, 0);
    assert_eq!(partial.positive, 6);
    assert_eq!(partial.sum, 6);
}

#[test]
fn test_bounds_empty_is_zero() {
    assert_eq!(bounds::<i8>(&[]), CheckedPartial::zero());
}

#[test]
fn test_apply_rejects_envelope_outside_range() {
    let partial = bounds(&[1i8, -1]);
    assert_eq!(partial.apply(0i8), Some(0));
    assert_eq!(partial.apply(i8::MAX), None);
    assert_eq!(partial.apply(i8::MIN), None);
    assert_eq!(partial.apply(i8::MAX - 1), Some(i8::MAX - 1));
}

// ---------------------------------------------------------------------------
// sum_checked
// ---------------------------------------------------------------------------

#[test]
fn test_sum_checked_reference_cases() {
    assert_eq!(sum_checked(&[i64::MAX, 1]).unwrap_err().index, 1);
    assert_eq!(sum_checked(&[i64::MIN, -1]).unwrap_err().index, 1);
    assert_eq!(sum_checked(&[i64::MAX, 0]), Ok(i64::MAX));
    assert_eq!(sum_checked(&[i64::MIN, 0]), Ok(i64::MIN));
}

#[test]
fn test_sum_checked_matches_serial_on_random_input() {
    let mut rng = StdRng::seed_from_u64(3);
    for round in 0..200 {
        let len = rng.random_range(0..2000);
        // Small values that occasionally hit the range boundary.
        let values: Vec<i16> = (0..len).map(|_| rng.random_range(-100..=300)).collect();
        assert_eq!(
            sum_checked(&values),
            checked::sum(&values),
            "round={round} len={len}"
        );
    }
}

#[test]
fn test_sum_checked_reports_transient_overflow() {
    // Total fits, but a prefix deep inside a block does not.
    let mut values = vec![0i32; 1000];
    values[700] = i32::MAX;
    values[701] = 1;
    values[702] = -1;
    let err = sum_checked(&values).unwrap_err();
    assert_eq!(err, checked::sum(&values).unwrap_err());
    assert_eq!(err.index, 701);
    assert_eq!(err.partial, i32::MAX);
}

#[test]
fn test_sum_checked_lanes_agree() {
    let values: Vec<u8> = (0..300).map(|i| (i % 7) as u8).collect();
    let expected = checked::sum(&values);
    assert_eq!(sum_checked_lanes::<u8, 1>(&values), expected);
    assert_eq!(sum_checked_lanes::<u8, 5>(&values), expected);
    assert_eq!(sum_checked_lanes::<u8, 32>(&values), expected);
}

#[test]
fn test_sum_checked_from_offsets_index() {
    let values = [100i8, 27, 1];
    let err = sum_checked_from::<i8, LANES>(0, &values, 1000).unwrap_err();
    assert_eq!(err.index, 1002);
    assert_eq!(err.partial, 127);
}

// ---------------------------------------------------------------------------
// float sums
// ---------------------------------------------------------------------------

#[test]
fn test_sum_f32() {
    let values: Vec<f32> = (1..=16).map(|x| x as f32).collect();
    assert_eq!(sum_f32(&values), 136.0);
}

#[test]
fn test_sum_f32_remainder() {
    let values: Vec<f32> = (1..=13).map(|x| x as f32).collect();
    assert_eq!(sum_f32(&values), 91.0);
}

#[test]
fn test_sum_f32_small_and_empty() {
    assert_eq!(sum_f32(&[1.0, 2.0, 3.0]), 6.0);
    assert_eq!(sum_f32(&[42.0]), 42.0);
    assert_eq!(sum_f32(&[]), 0.0);
}

#[test]
fn test_sum_f64_integers_are_exact() {
    for len in [0, 3, 4, 7, 8, 9, 31, 1000] {
        let values: Vec<f64> = (0..len).map(|x| x as f64 - 17.0).collect();
        let expected = (0..len).map(|x| x as i64 - 17).sum::<i64>() as f64;
        assert_eq!(sum_f64(&values), expected, "len={len}");
    }
}

#[test]
fn test_simd_vs_scalar_sum_f32() {
    let values: Vec<f32> = (0..1000).map(|x| x as f32 * 0.1).collect();
    let scalar_result = crate::scalar::sum_f32(&values);
    let simd_result = sum_f32(&values);
    assert!(
        (scalar_result - simd_result).abs() < 1e-1,
        "scalar={}, simd={}",
        scalar_result,
        simd_result
    );
}

#[test]
fn test_simd_vs_portable_sum_f64() {
    let values: Vec<f64> = (0..1000).map(|x| x as f64 * 0.1).collect();
    let portable_result = portable::sum_lanes::<f64, LANES>(&values);
    let simd_result = sum_f64(&values);
    assert!(
        (portable_result - simd_result).abs() < 1e-6,
        "portable={}, simd={}",
        portable_result,
        simd_result
    );
}

#[test]
fn test_dispatch_stays_close_to_portable_for_every_tail() {
    let mut rng = StdRng::seed_from_u64(31);
    for len in 0..=40 {
        let values: Vec<f64> = (0..len).map(|_| rng.random_range(-1.0..1.0)).collect();
        let magnitude: f64 = values.iter().map(|v| v.abs()).sum();
        let portable_result = portable::sum_lanes::<f64, LANES>(&values);
        let simd_result = sum_f64(&values);
        // Paths differ only in rounding order, bounded by len * eps * sum(|v|).
        let bound = (len as f64 + 1.0) * f64::EPSILON * magnitude;
        assert!(
            (portable_result - simd_result).abs() <= bound,
            "len={len}, portable={portable_result}, simd={simd_result}"
        );
    }
}
