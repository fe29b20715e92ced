/// Ulp-based comparison for floats.
pub trait FloatExt: Copy {
    /// Distance from `|self|` to the next representable value away from zero.
    ///
    /// NaN for NaN and infinite inputs.
    fn ulp(self) -> Self;

    /// True when `self` and `other` differ by at most `ulps` units in the last
    /// place of the larger magnitude.
    fn within_ulps(self, other: Self, ulps: u32) -> bool;
}

impl FloatExt for f32 {
    fn ulp(self) -> Self {
        if !self.is_finite() {
            return f32::NAN;
        }
        let abs = self.abs();
        f32::from_bits(abs.to_bits() + 1) - abs
    }

    fn within_ulps(self, other: Self, ulps: u32) -> bool {
        let scale = self.abs().max(other.abs());
        (self - other).abs() <= scale.ulp() * ulps as f32
    }
}

impl FloatExt for f64 {
    fn ulp(self) -> Self {
        if !self.is_finite() {
            return f64::NAN;
        }
        let abs = self.abs();
        f64::from_bits(abs.to_bits() + 1) - abs
    }

    fn within_ulps(self, other: Self, ulps: u32) -> bool {
        let scale = self.abs().max(other.abs());
        (self - other).abs() <= scale.ulp() * ulps as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn f64_ulp_of_one_is_epsilon() {
        assert_eq!(1.0_f64.ulp(), f64::EPSILON);
        assert_eq!((-1.0_f64).ulp(), f64::EPSILON);
    }

    #[test]
    fn f32_ulp_of_one_is_epsilon() {
        assert_eq!(1.0_f32.ulp(), f32::EPSILON);
    }

    #[test]
    fn ulp_of_zero_is_smallest_subnormal() {
        assert_eq!(0.0_f64.ulp(), f64::from_bits(1));
        assert_eq!(0.0_f32.ulp(), f32::from_bits(1));
    }

    #[test]
    fn ulp_of_non_finite_is_nan() {
        assert!(f64::INFINITY.ulp().is_nan());
        assert!(f64::NAN.ulp().is_nan());
        assert!(f32::NEG_INFINITY.ulp().is_nan());
    }

    #[test]
    fn within_ulps_counts_representable_steps() {
        let x = 1.0e10_f64;
        let next = f64::from_bits(x.to_bits() + 1);
        let two_up = f64::from_bits(x.to_bits() + 2);
        assert!(x.within_ulps(x, 0));
        assert!(x.within_ulps(next, 1));
        assert!(!x.within_ulps(two_up, 1));
        assert!(x.within_ulps(two_up, 2));
    }

    #[test]
    fn within_ulps_is_symmetric() {
        let a = 3.0_f32;
        let b = f32::from_bits(a.to_bits() + 1);
        assert_eq!(a.within_ulps(b, 1), b.within_ulps(a, 1));
    }

    #[test]
    fn nan_is_never_within_ulps() {
        assert!(!f64::NAN.within_ulps(f64::NAN, 1000));
        assert!(!f64::NAN.within_ulps(0.0, 1000));
    }
}
