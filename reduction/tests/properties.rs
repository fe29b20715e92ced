//! Cross-tier properties through the public API.

use common::float_ext::FloatExt;
use common::log_setup::init_test_logging;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use reduction::parallel::{self, ExactLazy, Widened};
use reduction::{
    checked, compensated, exact, scalar, vectorized, widened, BigInt, ConfigError, Decimal, Kernel,
    OverflowError, ParallelReducer, ReduceConfig, ReduceError,
};

fn reference(values: &[i64]) -> BigInt {
    values.iter().fold(BigInt::from(0), |acc, &v| acc + v)
}

#[test]
fn exact_variants_agree_with_reference() {
    init_test_logging();
    let mut rng = StdRng::seed_from_u64(1);
    for len in [0, 1, 2, 17, 1000] {
        let values: Vec<i64> = (0..len)
            .map(|i| match i % 5 {
                0 => i64::MAX,
                1 => i64::MIN,
                _ => rng.random(),
            })
            .collect();
        let expected = reference(&values);
        assert_eq!(exact::sum(&values), expected, "len={len}");
        assert_eq!(exact::sum_lazy(&values), expected, "len={len}");
    }
}

#[test]
fn widened_equals_exact_when_it_fits() {
    init_test_logging();
    let mut rng = StdRng::seed_from_u64(2);
    let values: Vec<i32> = (0..10_000).map(|_| rng.random()).collect();
    let wide = widened::sum(&values);
    assert_eq!(BigInt::from(wide), exact::sum(&values));
    assert_eq!(vectorized::sum_widened(&values), wide);

    let bytes: Vec<u8> = (0..10_000).map(|_| rng.random()).collect();
    assert_eq!(BigInt::from(widened::sum(&bytes)), exact::sum(&bytes));
}

#[test]
fn checked_boundaries() {
    init_test_logging();
    assert_eq!(
        checked::sum(&[i64::MAX, 1]),
        Err(OverflowError {
            index: 1,
            partial: i64::MAX
        })
    );
    assert_eq!(
        checked::sum(&[i64::MIN, -1]),
        Err(OverflowError {
            index: 1,
            partial: i64::MIN
        })
    );
    assert_eq!(checked::sum(&[i64::MAX, 0]), Ok(i64::MAX));
    assert_eq!(checked::sum(&[i64::MIN, 0]), Ok(i64::MIN));
    assert_eq!(vectorized::sum_checked(&[i64::MAX, 1]).unwrap_err().index, 1);
}

#[test]
fn parallel_matches_serial_for_every_degree() {
    init_test_logging();
    let mut rng = StdRng::seed_from_u64(4);
    let values: Vec<u64> = (0..64).map(|_| rng.random()).collect();
    let exact_total = exact::sum(&values);
    let wide_total = widened::sum(&values);
    for degree in 1..=values.len() {
        let reducer = ParallelReducer::new(degree).unwrap();
        assert_eq!(reducer.reduce(&values, &ExactLazy).unwrap(), exact_total);
        assert_eq!(reducer.reduce(&values, &Widened).unwrap(), wide_total);
    }
    assert_eq!(ExactLazy.reduce(&values[..]).unwrap(), exact_total);
}

#[test]
fn compensated_recovers_cancelled_terms() {
    init_test_logging();
    let values = [1.0, 1e100, 1.0, -1e100];
    assert_eq!(compensated::sum(&values), 2.0);
    assert_eq!(compensated::sum_lanes(&values), 2.0);
    assert_eq!(parallel::sum_compensated(&values, 2).unwrap(), 2.0);
    assert_eq!(scalar::sum_f64(&values), 0.0);
}

#[test]
fn empty_input_is_identity_everywhere() {
    init_test_logging();
    let ints: [i32; 0] = [];
    let floats: [f32; 0] = [];
    assert_eq!(scalar::sum(&ints), 0);
    assert_eq!(scalar::sum_f32(&floats), 0.0);
    assert_eq!(widened::sum(&ints), 0);
    assert_eq!(checked::sum(&ints), Ok(0));
    assert_eq!(vectorized::sum_checked(&ints), Ok(0));
    assert_eq!(vectorized::sum_f32(&floats), 0.0);
    assert_eq!(compensated::sum(&floats), 0.0);
    assert_eq!(exact::sum(&ints), BigInt::from(0));
    assert_eq!(exact::sum_lazy(&ints), BigInt::from(0));
    assert_eq!(exact::decimal::sum(&ints, 3), Ok(Decimal::ZERO));
    assert_eq!(parallel::sum_checked(&ints, 8), Ok(0));
}

#[test]
fn checked_fails_where_exact_succeeds() {
    init_test_logging();
    let values = [5u64, 7, 16, 4, 2, 0, u64::MAX, 3, 1];
    let err = checked::sum(&values).unwrap_err();
    assert_eq!(err.index, 6);
    assert_eq!(err.partial, 34);
    assert_eq!(vectorized::sum_checked(&values), Err(err));
    assert_eq!(parallel::sum_checked(&values, 4), Err(ReduceError::Overflow(err)));

    let expected = BigInt::from(u64::MAX) + 38;
    assert_eq!(exact::sum(&values), expected);
    assert_eq!(exact::sum_lazy(&values), expected);
    assert_eq!(parallel::sum_exact(&values, 3).unwrap(), expected);
    assert_eq!(
        exact::decimal::sum(&values, 0).unwrap(),
        Decimal::from(u64::MAX) + Decimal::from(38)
    );
}

#[test]
fn compensated_stays_close_to_exact() {
    init_test_logging();
    let mut rng = StdRng::seed_from_u64(9);
    let mut exact_total = 0i128;
    let values: Vec<f64> = (0..2000)
        .map(|_| {
            let x = rng.random_range(-(1i64 << 52)..(1i64 << 52)) as f64 * 4096.0;
            exact_total += x as i128;
            x
        })
        .collect();
    let exact_total = exact_total as f64;
    assert!(compensated::sum(&values).within_ulps(exact_total, 2));
    assert!(parallel::sum_compensated(&values, 5).unwrap().within_ulps(exact_total, 4));
}

#[test]
fn config_drives_reducer() {
    init_test_logging();
    let config: ReduceConfig =
        serde_json::from_str(r#"{"degree": 3, "parallel_threshold": 0}"#).unwrap();
    let reducer = ParallelReducer::from_config(&config).unwrap();
    assert_eq!(reducer.parts_for(10), 3);

    let bad: ReduceConfig = serde_json::from_str(r#"{"decimal_scale": 30}"#).unwrap();
    assert_eq!(
        ParallelReducer::from_config(&bad),
        Err(ConfigError::DecimalScale { scale: 30, max: 28 })
    );
}
