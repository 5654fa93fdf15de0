//! Standard normal distribution functions.
//!
//! This module provides:
//! - `norm_cdf`: Cumulative distribution function (CDF)
//! - `norm_pdf`: Probability density function (PDF)

use statrs::function::erf::erfc;

/// 1 / sqrt(2)
const FRAC_1_SQRT_2: f64 = std::f64::consts::FRAC_1_SQRT_2;

/// 1 / sqrt(2 * pi)
const FRAC_1_SQRT_2PI: f64 = 0.398_942_280_401_432_7;

/// Standard normal cumulative distribution function.
///
/// Computes P(X <= x) where X ~ N(0, 1) using the complementary error function.
///
/// # Mathematical Definition
/// Φ(x) = (1/2) * erfc(-x / sqrt(2))
///
/// Writing the CDF through erfc keeps full relative precision in the lower
/// tail, where `1 - Φ(-x)` would cancel.
///
/// # Returns
/// The probability P(X <= x) in [0, 1]. ±∞ map to 1 and 0; NaN maps to NaN.
///
/// # Examples
/// ```
/// use pricer_models::analytical::distributions::norm_cdf;
///
/// assert!((norm_cdf(0.0) - 0.5).abs() < 1e-15);
/// assert!((norm_cdf(1.0) - 0.8413447460685429).abs() < 1e-12);
/// assert_eq!(norm_cdf(f64::INFINITY), 1.0);
/// ```
#[inline]
pub fn norm_cdf(x: f64) -> f64 {
    0.5 * erfc(-x * FRAC_1_SQRT_2)
}

/// Standard normal probability density function.
///
/// # Mathematical Definition
/// φ(x) = (1 / sqrt(2π)) * exp(-x² / 2)
///
/// # Examples
/// ```
/// use pricer_models::analytical::distributions::norm_pdf;
///
/// // φ(0) = 1 / sqrt(2π) ≈ 0.3989
/// assert!((norm_pdf(0.0) - 0.3989422804).abs() < 1e-10);
/// ```
#[inline]
pub fn norm_pdf(x: f64) -> f64 {
    FRAC_1_SQRT_2PI * (-0.5 * x * x).exp()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    // ==========================================================
    // norm_cdf tests
    // ==========================================================

    #[test]
    fn test_norm_cdf_at_zero() {
        assert_relative_eq!(norm_cdf(0.0), 0.5, epsilon = 1e-15);
    }

    #[test]
    fn test_norm_cdf_reference_values() {
        // Reference values from high-precision tables, checked to 1e-12
        assert_relative_eq!(norm_cdf(1.0), 0.8413447460685429, epsilon = 1e-12);
        assert_relative_eq!(norm_cdf(-1.0), 0.15865525393145707, epsilon = 1e-12);
        assert_relative_eq!(norm_cdf(2.0), 0.9772498680518208, epsilon = 1e-12);
        assert_relative_eq!(norm_cdf(-2.0), 0.022750131948179195, epsilon = 1e-12);
        assert_relative_eq!(norm_cdf(3.0), 0.9986501019683699, epsilon = 1e-12);
        assert_relative_eq!(norm_cdf(-3.0), 0.0013498980316301035, epsilon = 1e-12);
    }

    #[test]
    fn test_norm_cdf_lower_tail_relative_accuracy() {
        // Φ(-8) ≈ 6.22e-16: an erf-based 1 - x formula would return 0 here
        let tail = norm_cdf(-8.0);
        assert_relative_eq!(tail, 6.220960574271785e-16, max_relative = 1e-8);
    }

    #[test]
    fn test_norm_cdf_symmetry() {
        for x in [-3.0, -2.0, -1.0, -0.5, 0.0, 0.5, 1.0, 2.0, 3.0] {
            assert_relative_eq!(norm_cdf(x) + norm_cdf(-x), 1.0, epsilon = 1e-14);
        }
    }

    #[test]
    fn test_norm_cdf_extreme_values() {
        assert_eq!(norm_cdf(f64::INFINITY), 1.0);
        assert_eq!(norm_cdf(f64::NEG_INFINITY), 0.0);

        let cdf_40 = norm_cdf(40.0);
        assert!(cdf_40 <= 1.0 && cdf_40 > 0.999999);

        let cdf_neg_40 = norm_cdf(-40.0);
        assert!((0.0..1e-300).contains(&cdf_neg_40));
    }

    #[test]
    fn test_norm_cdf_nan_passthrough() {
        assert!(norm_cdf(f64::NAN).is_nan());
    }

    #[test]
    fn test_norm_cdf_monotonic() {
        let values: Vec<f64> = (-50..=50).map(|i| i as f64 * 0.1).collect();
        for pair in values.windows(2) {
            assert!(
                norm_cdf(pair[1]) > norm_cdf(pair[0]),
                "CDF not monotonic at x = {}",
                pair[0]
            );
        }
    }

    // ==========================================================
    // norm_pdf tests
    // ==========================================================

    #[test]
    fn test_norm_pdf_reference_values() {
        assert_relative_eq!(norm_pdf(0.0), FRAC_1_SQRT_2PI, epsilon = 1e-15);
        assert_relative_eq!(norm_pdf(1.0), 0.24197072451914337, epsilon = 1e-14);
        assert_relative_eq!(norm_pdf(2.0), 0.05399096651318806, epsilon = 1e-14);
    }

    #[test]
    fn test_norm_pdf_symmetry() {
        for x in [0.5, 1.0, 1.5, 2.0, 2.5, 3.0] {
            assert_eq!(norm_pdf(x), norm_pdf(-x));
        }
    }

    #[test]
    fn test_cdf_pdf_relationship() {
        // Central difference of the CDF matches the PDF
        let h = 1e-5;
        for x in [-2.0, -1.0, 0.0, 1.0, 2.0] {
            let numerical_derivative = (norm_cdf(x + h) - norm_cdf(x - h)) / (2.0 * h);
            assert_relative_eq!(numerical_derivative, norm_pdf(x), epsilon = 1e-8);
        }
    }
}
