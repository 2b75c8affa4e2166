//! Standard normal cumulative distribution function, generic over `T: Float`.

use num_traits::Float;

/// sqrt(2 * pi)
const SQRT_2PI: f64 = 2.506_628_274_631;

/// Beyond this |x| the tail probability underflows double precision.
const TAIL_CUTOFF: f64 = 37.0;

/// Switch between the rational approximation and the continued fraction.
const RATIONAL_LIMIT: f64 = 7.071_067_811_865_47;

/// Numerator coefficients of Hart's rational approximation (highest degree first).
const HART_NUM: [f64; 7] = [
    3.526_249_659_989_11e-2,
    0.700_383_064_443_688,
    6.373_962_203_531_65,
    33.912_866_078_383,
    112.079_291_497_871,
    221.213_596_169_931,
    220.206_867_912_376,
];

/// Denominator coefficients of Hart's rational approximation (highest degree first).
const HART_DEN: [f64; 8] = [
    8.838_834_764_831_84e-2,
    1.755_667_163_182_64,
    16.064_177_579_207,
    86.780_732_202_946_1,
    296.564_248_779_674,
    637.333_633_378_831,
    793.826_512_519_948,
    440.413_735_824_752,
];

#[inline]
fn horner<T: Float>(coefficients: &[f64], x: T) -> T {
    coefficients
        .iter()
        .fold(T::zero(), |acc, &c| acc * x + T::from(c).unwrap())
}

/// Standard normal cumulative distribution function.
///
/// Computes P(X <= x) where X ~ N(0, 1) with Hart's double-precision
/// algorithm (as popularised by West, 2005): a rational approximation for
/// `|x| < 7.07` and a continued fraction in the tails.
///
/// # Accuracy
/// Absolute error below 1e-14 over the real line.
///
/// # Symmetry
/// The lower tail is computed once and reflected, so
/// `norm_cdf(x) + norm_cdf(-x) == 1` up to one rounding.
///
/// # Examples
/// ```
/// use pricer_models::analytical::distributions::norm_cdf;
///
/// assert!((norm_cdf(0.0_f64) - 0.5).abs() < 1e-15);
/// assert!((norm_cdf(1.0_f64) - 0.841_344_746_068_542_9).abs() < 1e-13);
/// assert!(norm_cdf(-40.0_f64) == 0.0);
/// ```
pub fn norm_cdf<T: Float>(x: T) -> T {
    let abs_x = x.abs();

    let tail = if abs_x > T::from(TAIL_CUTOFF).unwrap() {
        T::zero()
    } else {
        let half = T::from(0.5).unwrap();
        let gaussian = (-half * abs_x * abs_x).exp();

        if abs_x < T::from(RATIONAL_LIMIT).unwrap() {
            gaussian * horner(&HART_NUM, abs_x) / horner(&HART_DEN, abs_x)
        } else {
            // Continued fraction: x + 1/(x + 2/(x + 3/(x + 4/(x + 0.65))))
            let mut fraction = abs_x + T::from(0.65).unwrap();
            for k in [4.0, 3.0, 2.0, 1.0] {
                fraction = abs_x + T::from(k).unwrap() / fraction;
            }
            gaussian / fraction / T::from(SQRT_2PI).unwrap()
        }
    };

    if x > T::zero() {
        T::one() - tail
    } else {
        tail
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_norm_cdf_at_zero() {
        assert_relative_eq!(norm_cdf(0.0_f64), 0.5, epsilon = 1e-15);
    }

    #[test]
    fn test_norm_cdf_reference_values() {
        // Reference values from standard normal tables
        assert_relative_eq!(norm_cdf(1.0_f64), 0.8413447460685429, epsilon = 1e-13);
        assert_relative_eq!(norm_cdf(-1.0_f64), 0.15865525393145707, epsilon = 1e-13);
        assert_relative_eq!(norm_cdf(2.0_f64), 0.9772498680518208, epsilon = 1e-13);
        assert_relative_eq!(norm_cdf(-2.0_f64), 0.022750131948179195, epsilon = 1e-13);
        assert_relative_eq!(norm_cdf(3.0_f64), 0.9986501019683699, epsilon = 1e-13);
        assert_relative_eq!(norm_cdf(-1.96_f64), 0.024997895148220435, epsilon = 1e-13);
    }

    #[test]
    fn test_norm_cdf_far_tail_uses_continued_fraction() {
        // Φ(-8) ≈ 6.22096e-16
        let value = norm_cdf(-8.0_f64);
        assert_relative_eq!(value, 6.220960574271785e-16, max_relative = 1e-6);
    }

    #[test]
    fn test_norm_cdf_symmetry() {
        for i in -80..=80 {
            let x = i as f64 * 0.1;
            assert_relative_eq!(norm_cdf(x) + norm_cdf(-x), 1.0, epsilon = 1e-15);
        }
    }

    #[test]
    fn test_norm_cdf_monotonic_and_bounded() {
        let values: Vec<f64> = (-100..=100).map(|i| i as f64 * 0.1).collect();
        for pair in values.windows(2) {
            let (a, b) = (norm_cdf(pair[0]), norm_cdf(pair[1]));
            assert!((0.0..=1.0).contains(&a));
            assert!(b >= a, "CDF not monotonic at x = {}", pair[0]);
        }
    }

    #[test]
    fn test_norm_cdf_extreme_values() {
        assert_eq!(norm_cdf(40.0_f64), 1.0);
        assert_eq!(norm_cdf(-40.0_f64), 0.0);
    }

    #[test]
    fn test_cdf_derivative_matches_density() {
        let h = 1e-5;
        for x in [-2.0_f64, -1.0, 0.0, 0.5, 1.5] {
            let numerical = (norm_cdf(x + h) - norm_cdf(x - h)) / (2.0 * h);
            let density = (-0.5 * x * x).exp() / SQRT_2PI;
            assert_relative_eq!(numerical, density, epsilon = 1e-8);
        }
    }

    #[test]
    fn test_f32_compatibility() {
        assert!((norm_cdf(0.0_f32) - 0.5).abs() < 1e-6);
    }
}
