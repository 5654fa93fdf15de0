//! Fixed-step relaxation solver.

use std::convert::Infallible;

use num_traits::Float;

use super::{Iteration, SolverConfig, SolverOutcome};
use crate::types::SolverError;

/// Derivative-free fixed-step iteration towards `f(x) = target`.
///
/// Each iteration evaluates `f(x)`, records `|f(x) - target|`, and then moves
/// the iterate by a fixed multiple of the miss:
///
/// `x_{n+1} = x_n + step · (target − f(x_n)) / scale`
///
/// `scale` defaults to one. The product `step · miss` is formed before the
/// division, so a caller passing `step = λ` and `scale = s` gets exactly the
/// floating-point result of `x + λ · miss / s`.
///
/// The update is applied on every iteration, including the one whose
/// residual meets the tolerance, so the returned value is one step past the
/// last measured point.
///
/// Convergence is linear when `0 < step · f'(x*) < 2` and is not guaranteed
/// otherwise; the iteration budget is the only bound on run time.
///
/// # Example
///
/// ```
/// use pricer_core::math::solvers::{RelaxationSolver, SolverConfig};
///
/// // e^x = 3, step chosen close to 1/f'(root)
/// let solver = RelaxationSolver::new(SolverConfig::new(1e-12, 500));
/// let outcome = solver.solve(|x: f64| x.exp(), 3.0, 0.3, 1.0).unwrap();
///
/// assert!(outcome.is_converged());
/// assert!((outcome.value() - 3.0_f64.ln()).abs() < 1e-10);
/// ```
#[derive(Debug, Clone)]
pub struct RelaxationSolver<T: Float> {
    /// Solver configuration
    config: SolverConfig<T>,
    /// Divisor applied to each update
    scale: T,
}

impl<T: Float> RelaxationSolver<T> {
    /// Create a new relaxation solver with the given configuration.
    pub fn new(config: SolverConfig<T>) -> Self {
        Self {
            config,
            scale: T::one(),
        }
    }

    /// Create a solver with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(SolverConfig::default())
    }

    /// Divide every update by `scale`.
    pub fn with_scale(mut self, scale: T) -> Self {
        self.scale = scale;
        self
    }

    /// Returns the update divisor.
    pub fn scale(&self) -> T {
        self.scale
    }

    /// Returns a reference to the solver configuration.
    pub fn config(&self) -> &SolverConfig<T> {
        &self.config
    }

    /// Run the loop without validation or classification.
    ///
    /// The residual is seeded with `1`, so when `tolerance >= 1` no iteration
    /// runs and `initial` comes back untouched. Non-finite values propagate;
    /// a NaN residual ends the loop early.
    pub fn run<F>(&self, f: F, target: T, step: T, initial: T) -> Iteration<T>
    where
        F: Fn(T) -> T,
    {
        self.iterate(f, target, step, initial, T::one())
    }

    /// Validate the configuration, run the loop and classify the result.
    ///
    /// Unlike [`RelaxationSolver::run`], the residual is seeded with
    /// infinity so at least one measured iteration always runs.
    ///
    /// # Errors
    ///
    /// * `SolverError::InvalidConfig` - invalid tolerance, zero budget, non-finite step or
    ///   a zero or non-finite scale
    /// * `SolverError::NumericalInstability` - the iteration produced a non-finite value
    pub fn solve<F>(
        &self,
        f: F,
        target: T,
        step: T,
        initial: T,
    ) -> Result<SolverOutcome<T>, SolverError>
    where
        F: Fn(T) -> T,
    {
        self.config.validate()?;
        if !step.is_finite() {
            return Err(SolverError::InvalidConfig(format!(
                "relaxation step must be finite, got {}",
                step.to_f64().unwrap_or(f64::NAN)
            )));
        }
        if !self.scale.is_finite() || self.scale == T::zero() {
            return Err(SolverError::InvalidConfig(format!(
                "relaxation scale must be finite and non-zero, got {}",
                self.scale.to_f64().unwrap_or(f64::NAN)
            )));
        }

        self.iterate(f, target, step, initial, T::infinity())
            .classify(self.config.tolerance)
    }

    fn iterate<F>(&self, f: F, target: T, step: T, initial: T, seed: T) -> Iteration<T>
    where
        F: Fn(T) -> T,
    {
        let result = Iteration::drive(
            self.config.tolerance,
            self.config.max_iterations,
            seed,
            initial,
            |x| -> Result<(T, T), Infallible> {
                let miss = target - f(x);
                Ok((miss.abs(), x + step * miss / self.scale))
            },
        );

        match result {
            Ok(iteration) => iteration,
            Err(never) => match never {},
        }
    }
}
