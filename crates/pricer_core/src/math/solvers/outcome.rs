//! Loop state and tagged results of iterative solvers.

use num_traits::Float;

use crate::types::SolverError;

/// Raw end state of an iteration loop.
///
/// `residual` is the absolute residual measured on the last iteration, or
/// the loop's seed value when no iteration ran. `value` is the iterate
/// after the last update.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Iteration<T> {
    /// Last iterate
    pub value: T,
    /// Number of iterations executed
    pub iterations: usize,
    /// Absolute residual of the last evaluation
    pub residual: T,
}

impl<T: Float> Iteration<T> {
    /// Run the shared solver loop.
    ///
    /// `step` maps the current iterate to `(|residual|, next iterate)`.
    /// The loop runs while `residual > tolerance` and the iteration budget
    /// is not spent; `seed` is the residual before the first evaluation.
    /// A NaN residual ends the loop because `NaN > tolerance` is false.
    pub fn drive<S, E>(
        tolerance: T,
        max_iterations: usize,
        seed: T,
        initial: T,
        mut step: S,
    ) -> Result<Self, E>
    where
        S: FnMut(T) -> Result<(T, T), E>,
    {
        let mut value = initial;
        let mut iterations = 0;
        let mut residual = seed;

        while residual > tolerance && iterations < max_iterations {
            let (measured, next) = step(value)?;
            residual = measured;
            value = next;
            iterations += 1;
        }

        Ok(Self {
            value,
            iterations,
            residual,
        })
    }

    /// Classify the end state against `tolerance`.
    ///
    /// # Errors
    ///
    /// `SolverError::NumericalInstability` if the residual or the iterate is
    /// not finite.
    pub fn classify(self, tolerance: T) -> Result<SolverOutcome<T>, SolverError> {
        if !self.residual.is_finite() || !self.value.is_finite() {
            return Err(SolverError::NumericalInstability(format!(
                "non-finite iterate after {} iterations (value = {}, residual = {})",
                self.iterations,
                self.value.to_f64().unwrap_or(f64::NAN),
                self.residual.to_f64().unwrap_or(f64::NAN),
            )));
        }

        let Self {
            value,
            iterations,
            residual,
        } = self;

        if residual <= tolerance {
            Ok(SolverOutcome::Converged {
                value,
                iterations,
                residual,
            })
        } else {
            Ok(SolverOutcome::IterationLimitExceeded {
                value,
                iterations,
                residual,
            })
        }
    }
}

/// Result of a validated solve.
///
/// Both variants carry the last iterate, so callers that only want a number
/// can use [`SolverOutcome::value`] and still tell success from exhaustion.
///
/// # Examples
/// ```
/// use pricer_core::math::solvers::SolverOutcome;
///
/// let outcome = SolverOutcome::IterationLimitExceeded {
///     value: 0.19,
///     iterations: 10,
///     residual: 0.3,
/// };
/// assert!(!outcome.is_converged());
/// assert_eq!(outcome.value(), 0.19);
/// assert!(outcome.into_converged().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "status", rename_all = "snake_case")
)]
pub enum SolverOutcome<T> {
    /// The residual fell to or below the tolerance.
    Converged {
        /// Final iterate
        value: T,
        /// Iterations used
        iterations: usize,
        /// Absolute residual of the last evaluation
        residual: T,
    },

    /// The iteration budget ran out before the tolerance was met.
    IterationLimitExceeded {
        /// Last iterate
        value: T,
        /// Iterations used (equal to the budget)
        iterations: usize,
        /// Absolute residual of the last evaluation
        residual: T,
    },
}

impl<T: Float> SolverOutcome<T> {
    /// Returns the last iterate regardless of convergence.
    #[inline]
    pub fn value(&self) -> T {
        match *self {
            SolverOutcome::Converged { value, .. }
            | SolverOutcome::IterationLimitExceeded { value, .. } => value,
        }
    }

    /// Returns the number of iterations executed.
    #[inline]
    pub fn iterations(&self) -> usize {
        match *self {
            SolverOutcome::Converged { iterations, .. }
            | SolverOutcome::IterationLimitExceeded { iterations, .. } => iterations,
        }
    }

    /// Returns the absolute residual of the last evaluation.
    #[inline]
    pub fn residual(&self) -> T {
        match *self {
            SolverOutcome::Converged { residual, .. }
            | SolverOutcome::IterationLimitExceeded { residual, .. } => residual,
        }
    }

    /// Returns true if the tolerance was met.
    #[inline]
    pub fn is_converged(&self) -> bool {
        matches!(self, SolverOutcome::Converged { .. })
    }

    /// Turns exhaustion into an error.
    ///
    /// # Errors
    ///
    /// `SolverError::MaxIterationsExceeded` for `IterationLimitExceeded`.
    pub fn into_converged(self) -> Result<T, SolverError> {
        match self {
            SolverOutcome::Converged { value, .. } => Ok(value),
            SolverOutcome::IterationLimitExceeded {
                iterations,
                residual,
                ..
            } => Err(SolverError::MaxIterationsExceeded {
                iterations,
                residual: residual.to_f64().unwrap_or(f64::NAN),
            }),
        }
    }
}
