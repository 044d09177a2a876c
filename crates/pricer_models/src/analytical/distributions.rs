//! Standard normal distribution functions.
//!
//! - `norm_cdf`: Hart's rational approximation in West's double-precision
//!   form (absolute error below 1e-14), so closed forms and the lattice can be
//!   compared at tight tolerances
//! - `norm_pdf`: exact density

use num_traits::Float;

/// 1 / sqrt(2 * pi)
const FRAC_1_SQRT_2PI: f64 = 0.398_942_280_401_432_7;

/// sqrt(2 * pi)
const SQRT_2PI: f64 = 2.506_628_274_631;

/// Beyond this |x| the tail is below f64 resolution.
const TAIL_CUTOFF: f64 = 37.0;

/// Switch-over between the rational form and the continued fraction.
const RATIONAL_LIMIT: f64 = 7.071_067_811_865_47;

const NUM: [f64; 7] = [
    3.526_249_659_989_11e-2,
    0.700_383_064_443_688,
    6.373_962_203_531_65,
    33.912_866_078_383,
    112.079_291_497_871,
    221.213_596_169_931,
    220.206_867_912_376,
];

const DEN: [f64; 8] = [
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
fn c<T: Float>(x: f64) -> T {
    T::from(x).unwrap()
}

#[inline]
fn horner<T: Float>(coeffs: &[f64], x: T) -> T {
    coeffs
        .iter()
        .fold(T::zero(), |acc, &k| acc * x + c::<T>(k))
}

/// Standard normal cumulative distribution function.
///
/// Computes P(X <= x) for X ~ N(0, 1). The lower tail is evaluated directly
/// and the upper tail by reflection, so `norm_cdf(x) + norm_cdf(-x) == 1`
/// holds to rounding.
///
/// # Examples
/// ```
/// use pricer_models::analytical::distributions::norm_cdf;
///
/// assert!((norm_cdf(0.0_f64) - 0.5).abs() < 1e-15);
/// assert!((norm_cdf(1.0_f64) - 0.841_344_746_068_542_9).abs() < 1e-13);
/// ```
#[inline]
pub fn norm_cdf<T: Float>(x: T) -> T {
    let z = x.abs();

    let tail = if z > c(TAIL_CUTOFF) {
        T::zero()
    } else {
        let gauss = (-z * z / c(2.0)).exp();
        if z < c(RATIONAL_LIMIT) {
            gauss * horner(&NUM, z) / horner(&DEN, z)
        } else {
            // Continued fraction for the far tail
            let mut frac = z + c(0.65);
            for k in [4.0, 3.0, 2.0, 1.0] {
                frac = z + c::<T>(k) / frac;
            }
            gauss / frac / c(SQRT_2PI)
        }
    };

    if x > T::zero() {
        T::one() - tail
    } else {
        tail
    }
}

/// Standard normal probability density function.
///
/// # Examples
/// ```
/// use pricer_models::analytical::distributions::norm_pdf;
///
/// assert!((norm_pdf(0.0_f64) - 0.398_942_280_4).abs() < 1e-10);
/// ```
#[inline]
pub fn norm_pdf<T: Float>(x: T) -> T {
    c::<T>(FRAC_1_SQRT_2PI) * (-x * x / c(2.0)).exp()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    // ==========================================================
    // norm_cdf
    // ==========================================================

    #[test]
    fn test_norm_cdf_reference_values() {
        let cases = [
            (-3.0, 0.001_349_898_031_630_094_6),
            (-2.0, 0.022_750_131_948_179_195),
            (-1.0, 0.158_655_253_931_457_05),
            (0.0, 0.5),
            (0.5, 0.691_462_461_274_013_1),
            (1.0, 0.841_344_746_068_542_9),
            (2.0, 0.977_249_868_051_820_8),
            (3.0, 0.998_650_101_968_369_9),
        ];
        for (x, expected) in cases {
            assert_relative_eq!(norm_cdf(x), expected, epsilon = 1e-13);
        }
    }

    #[test]
    fn test_norm_cdf_symmetry() {
        for i in -80..=80 {
            let x = i as f64 * 0.1;
            assert_relative_eq!(norm_cdf(x) + norm_cdf(-x), 1.0, epsilon = 1e-15);
        }
    }

    #[test]
    fn test_norm_cdf_far_tail() {
        // Continued-fraction branch
        let lower = norm_cdf(-8.0_f64);
        assert_relative_eq!(lower, 6.220_960_574_271_785e-16, max_relative = 1e-7);
        assert_eq!(norm_cdf(-40.0_f64), 0.0);
        assert_eq!(norm_cdf(40.0_f64), 1.0);
    }

    #[test]
    fn test_norm_cdf_monotonic_and_bounded() {
        let mut prev = 0.0;
        for i in -100..=100 {
            let v = norm_cdf(i as f64 * 0.1);
            assert!((0.0..=1.0).contains(&v));
            assert!(v >= prev, "not monotone at {}", i);
            prev = v;
        }
    }

    #[test]
    fn test_norm_cdf_f32() {
        assert!((norm_cdf(0.0_f32) - 0.5).abs() < 1e-6);
    }

    // ==========================================================
    // norm_pdf
    // ==========================================================

    #[test]
    fn test_norm_pdf_reference_values() {
        assert_relative_eq!(norm_pdf(0.0_f64), FRAC_1_SQRT_2PI, epsilon = 1e-15);
        assert_relative_eq!(norm_pdf(1.0_f64), 0.241_970_724_519_143_37, epsilon = 1e-14);
        assert_relative_eq!(norm_pdf(-2.0_f64), 0.053_990_966_513_188_06, epsilon = 1e-14);
    }

    #[test]
    fn test_cdf_derivative_matches_pdf() {
        let h = 1e-5;
        for x in [-2.0, -1.0, 0.0, 1.0, 2.0] {
            let derivative = (norm_cdf(x + h) - norm_cdf(x - h)) / (2.0 * h);
            assert_relative_eq!(derivative, norm_pdf(x), epsilon = 1e-8);
        }
    }
}
