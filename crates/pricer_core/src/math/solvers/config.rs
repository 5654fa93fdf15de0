//! Solver configuration types.

use num_traits::Float;

use crate::types::SolverError;

/// Configuration for root-finding algorithms.
///
/// Provides common settings shared across all solver implementations,
/// including convergence tolerance and iteration limits.
///
/// # Type Parameters
///
/// * `T` - Floating-point type for tolerance (e.g., `f64`)
///
/// # Example
///
/// ```
/// use pricer_core::math::solvers::SolverConfig;
///
/// // Use default configuration
/// let config: SolverConfig<f64> = SolverConfig::default();
/// assert_eq!(config.tolerance, 1e-6);
/// assert_eq!(config.max_iterations, 1000);
///
/// // Custom configuration
/// let custom = SolverConfig {
///     tolerance: 1e-12,
///     max_iterations: 200,
/// };
/// assert!(custom.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SolverConfig<T: Float> {
    /// Convergence tolerance on the absolute residual.
    ///
    /// The solver stops once `|f(x) - target| <= tolerance`. Zero is legal
    /// and makes convergence unreachable in practice.
    pub tolerance: T,

    /// Maximum number of iterations before giving up.
    pub max_iterations: usize,
}

impl<T: Float> Default for SolverConfig<T> {
    /// Default values:
    /// - `tolerance`: 1e-6
    /// - `max_iterations`: 1000
    fn default() -> Self {
        Self {
            tolerance: T::from(1e-6).unwrap_or_else(T::epsilon),
            max_iterations: 1000,
        }
    }
}

impl<T: Float> SolverConfig<T> {
    /// Create a new configuration with specified values.
    ///
    /// No validation is performed here; see [`SolverConfig::validate`].
    ///
    /// # Example
    ///
    /// ```
    /// use pricer_core::math::solvers::SolverConfig;
    ///
    /// let config = SolverConfig::new(1e-12, 200);
    /// assert_eq!(config.max_iterations, 200);
    /// ```
    pub fn new(tolerance: T, max_iterations: usize) -> Self {
        Self {
            tolerance,
            max_iterations,
        }
    }

    /// Check that the configuration can drive a solver.
    ///
    /// # Errors
    ///
    /// `SolverError::InvalidConfig` if the tolerance is negative or NaN,
    /// or if `max_iterations` is zero.
    pub fn validate(&self) -> Result<(), SolverError> {
        if self.tolerance.is_nan() || self.tolerance < T::zero() {
            return Err(SolverError::InvalidConfig(format!(
                "tolerance must be non-negative, got {}",
                self.tolerance.to_f64().unwrap_or(f64::NAN)
            )));
        }
        if self.max_iterations == 0 {
            return Err(SolverError::InvalidConfig(
                "max_iterations must be > 0".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config: SolverConfig<f64> = SolverConfig::default();
        assert!((config.tolerance - 1e-6).abs() < 1e-15);
        assert_eq!(config.max_iterations, 1000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_new_config() {
        let config: SolverConfig<f64> = SolverConfig::new(1e-12, 200);
        assert!((config.tolerance - 1e-12).abs() < 1e-17);
        assert_eq!(config.max_iterations, 200);
    }

    #[test]
    fn test_zero_tolerance_is_valid() {
        let config: SolverConfig<f64> = SolverConfig::new(0.0, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_negative_tolerance_rejected() {
        let config: SolverConfig<f64> = SolverConfig::new(-1e-10, 100);
        match config.validate() {
            Err(SolverError::InvalidConfig(msg)) => assert!(msg.contains("tolerance")),
            other => panic!("Expected InvalidConfig, got {:?}", other),
        }
    }

    #[test]
    fn test_nan_tolerance_rejected() {
        let config: SolverConfig<f64> = SolverConfig::new(f64::NAN, 100);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_iterations_rejected() {
        let config: SolverConfig<f64> = SolverConfig::new(1e-10, 0);
        match config.validate() {
            Err(SolverError::InvalidConfig(msg)) => assert!(msg.contains("max_iterations")),
            other => panic!("Expected InvalidConfig, got {:?}", other),
        }
    }

    #[test]
    fn test_config_copy() {
        let config1: SolverConfig<f64> = SolverConfig::default();
        let config2 = config1;
        assert_eq!(config1, config2);
    }

    #[test]
    fn test_config_with_f32() {
        let config: SolverConfig<f32> = SolverConfig::default();
        assert!(config.tolerance > 0.0);
        assert_eq!(config.max_iterations, 1000);
    }
}
