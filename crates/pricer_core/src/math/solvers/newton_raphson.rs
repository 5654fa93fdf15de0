//! Newton-Raphson root-finding solver.

use super::{Iteration, SolverConfig, SolverOutcome};
use crate::types::SolverError;
use num_traits::Float;
use std::convert::Infallible;

/// Newton-Raphson root finder.
///
/// Uses Newton's method: `x_{n+1} = x_n - f(x_n) / f'(x_n)` for fast
/// quadratic convergence on smooth functions.
///
/// # Type Parameters
///
/// * `T` - Floating-point type (e.g., `f64`)
///
/// # Convergence
///
/// Newton-Raphson converges quadratically near a root, meaning the number
/// of correct digits approximately doubles each iteration. However, it may
/// fail if:
/// - The derivative is near zero
/// - The initial guess is far from the root
/// - The function has discontinuities
///
/// # Example
///
/// ```
/// use pricer_core::math::solvers::{NewtonRaphsonSolver, SolverConfig};
///
/// // Solve x² - 2 = 0 (find √2)
/// let solver = NewtonRaphsonSolver::new(SolverConfig::new(1e-12, 50));
///
/// let f = |x: f64| x * x - 2.0;
/// let f_prime = |x: f64| 2.0 * x;
///
/// let root = solver.find_root(f, f_prime, 1.0).unwrap();
/// assert!(root.is_converged());
/// assert!((root.value() - std::f64::consts::SQRT_2).abs() < 1e-10);
/// ```
#[derive(Debug, Clone)]
pub struct NewtonRaphsonSolver<T: Float> {
    /// Solver configuration
    config: SolverConfig<T>,
}

impl<T: Float> NewtonRaphsonSolver<T> {
    /// Create a new Newton-Raphson solver with the given configuration.
    pub fn new(config: SolverConfig<T>) -> Self {
        Self { config }
    }

    /// Create a solver with default configuration.
    pub fn with_defaults() -> Self {
        Self {
            config: SolverConfig::default(),
        }
    }

    /// Find a root of `f` using explicit derivative `f_prime`.
    ///
    /// The iterate is left in place once `|f(x)| <= tolerance`.
    ///
    /// # Returns
    ///
    /// * `Ok(SolverOutcome::Converged)` - Root where `|f(x)| <= tolerance`
    /// * `Ok(SolverOutcome::IterationLimitExceeded)` - Budget spent, last iterate returned
    /// * `Err(SolverError::DerivativeNearZero)` - Derivative too small
    /// * `Err(SolverError::NumericalInstability)` - Non-finite iterate
    /// * `Err(SolverError::InvalidConfig)` - Invalid tolerance or budget
    ///
    /// # Example
    ///
    /// ```
    /// use pricer_core::math::solvers::{NewtonRaphsonSolver, SolverConfig};
    ///
    /// let solver = NewtonRaphsonSolver::new(SolverConfig::new(1e-12, 50));
    ///
    /// // Solve x³ - x - 2 = 0
    /// let f = |x: f64| x * x * x - x - 2.0;
    /// let f_prime = |x: f64| 3.0 * x * x - 1.0;
    ///
    /// let root = solver.find_root(f, f_prime, 1.5).unwrap().value();
    /// assert!((f(root)).abs() < 1e-10);
    /// ```
    pub fn find_root<F, G>(
        &self,
        f: F,
        f_prime: G,
        x0: T,
    ) -> Result<SolverOutcome<T>, SolverError>
    where
        F: Fn(T) -> T,
        G: Fn(T) -> T,
    {
        self.config.validate()?;

        let tolerance = self.config.tolerance;
        let epsilon = T::from(1e-30).unwrap_or_else(T::min_positive_value);

        Iteration::drive(
            tolerance,
            self.config.max_iterations,
            T::infinity(),
            x0,
            |x| {
                let f_val = f(x);
                let residual = f_val.abs();

                if residual <= tolerance {
                    return Ok((residual, x));
                }

                let f_prime_val = f_prime(x);

                // Check for near-zero derivative
                if f_prime_val.abs() < epsilon {
                    return Err(SolverError::DerivativeNearZero {
                        x: x.to_f64().unwrap_or(f64::NAN),
                    });
                }

                let next = x - f_val / f_prime_val;

                // Check for non-finite values
                if !next.is_finite() {
                    return Err(SolverError::NumericalInstability(
                        "Newton iteration produced non-finite value".to_string(),
                    ));
                }

                Ok((residual, next))
            },
        )?
        .classify(tolerance)
    }

    /// Find a root of `f` inside `[lower, upper]`, falling back to bisection
    /// whenever a Newton step would leave the current bracket.
    ///
    /// `f(lower)` and `f(upper)` must have opposite signs. Every evaluated
    /// iterate shrinks the bracket, so the iterate never leaves
    /// `[lower, upper]` and a vanishing derivative costs one bisection
    /// rather than the whole solve. A start outside the open interval is
    /// replaced by its midpoint.
    ///
    /// # Returns
    ///
    /// * `Ok(SolverOutcome::Converged)` - Root where `|f(x)| <= tolerance`
    /// * `Ok(SolverOutcome::IterationLimitExceeded)` - Budget spent, last iterate returned
    /// * `Err(SolverError::NoBracket)` - `f` has the same sign at both ends
    /// * `Err(SolverError::NumericalInstability)` - `f` turned non-finite inside the bracket
    /// * `Err(SolverError::InvalidConfig)` - Invalid tolerance, budget or interval
    ///
    /// # Example
    ///
    /// ```
    /// use pricer_core::math::solvers::{NewtonRaphsonSolver, SolverConfig};
    ///
    /// let solver = NewtonRaphsonSolver::new(SolverConfig::new(1e-12, 100));
    ///
    /// // atan has a flat tail that throws plain Newton far off from x0 = 3
    /// let root = solver
    ///     .find_root_bracketed(|x: f64| x.atan(), |x: f64| 1.0 / (1.0 + x * x), 3.0, -1.0, 5.0)
    ///     .unwrap();
    /// assert!(root.is_converged());
    /// assert!(root.value().abs() < 1e-10);
    /// ```
    pub fn find_root_bracketed<F, G>(
        &self,
        f: F,
        f_prime: G,
        x0: T,
        lower: T,
        upper: T,
    ) -> Result<SolverOutcome<T>, SolverError>
    where
        F: Fn(T) -> T,
        G: Fn(T) -> T,
    {
        self.config.validate()?;
        if !(lower.is_finite() && upper.is_finite() && lower < upper) {
            return Err(SolverError::InvalidConfig(format!(
                "bracket must be a finite interval with lower < upper, got [{}, {}]",
                lower.to_f64().unwrap_or(f64::NAN),
                upper.to_f64().unwrap_or(f64::NAN)
            )));
        }

        let f_lower = f(lower);
        let f_upper = f(upper);
        if !(f_lower.is_finite() && f_upper.is_finite()) || f_lower * f_upper > T::zero() {
            return Err(SolverError::NoBracket {
                a: lower.to_f64().unwrap_or(f64::NAN),
                b: upper.to_f64().unwrap_or(f64::NAN),
            });
        }

        // f(neg) <= 0 <= f(pos)
        let (mut neg, mut pos) = if f_lower < T::zero() {
            (lower, upper)
        } else {
            (upper, lower)
        };

        let tolerance = self.config.tolerance;
        let epsilon = T::from(1e-30).unwrap_or_else(T::min_positive_value);
        let half = T::from(0.5).unwrap_or_else(T::one);
        let start = if x0.is_finite() && x0 > lower && x0 < upper {
            x0
        } else {
            half * (lower + upper)
        };

        let result = Iteration::drive(
            tolerance,
            self.config.max_iterations,
            T::infinity(),
            start,
            |x| -> Result<(T, T), Infallible> {
                let f_val = f(x);
                let residual = f_val.abs();

                if residual <= tolerance {
                    return Ok((residual, x));
                }

                if f_val < T::zero() {
                    neg = x;
                } else {
                    pos = x;
                }

                let f_prime_val = f_prime(x);
                let newton = x - f_val / f_prime_val;
                let (a, b) = (neg.min(pos), neg.max(pos));

                let next = if f_prime_val.abs() < epsilon
                    || !newton.is_finite()
                    || newton <= a
                    || newton >= b
                {
                    half * (neg + pos)
                } else {
                    newton
                };

                Ok((residual, next))
            },
        );

        match result {
            Ok(iteration) => iteration.classify(tolerance),
            Err(never) => match never {},
        }
    }

    /// Returns a reference to the solver configuration.
    pub fn config(&self) -> &SolverConfig<T> {
        &self.config
    }
}
