//! Error types for structured error handling.
//!
//! This module provides:
//! - `SolverError`: Errors from root-finding solvers

use thiserror::Error;

/// Root-finding solver errors.
///
/// Iteration exhaustion is normally reported through
/// [`SolverOutcome::IterationLimitExceeded`](crate::math::solvers::SolverOutcome)
/// rather than as an error; `MaxIterationsExceeded` exists for callers that
/// want to treat it as a hard failure via
/// [`SolverOutcome::into_converged`](crate::math::solvers::SolverOutcome::into_converged).
///
/// # Examples
/// ```
/// use pricer_core::types::SolverError;
///
/// let err = SolverError::MaxIterationsExceeded { iterations: 100, residual: 0.5 };
/// assert!(format!("{}", err).contains("100 iterations"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SolverError {
    /// Solver failed to converge within maximum iterations.
    #[error("Failed to converge after {iterations} iterations (residual = {residual})")]
    MaxIterationsExceeded {
        /// Number of iterations attempted
        iterations: usize,
        /// Absolute residual after the last iteration
        residual: f64,
    },

    /// Derivative near zero (division by zero risk in Newton-Raphson).
    #[error("Derivative near zero at x = {x}")]
    DerivativeNearZero {
        /// The x value where derivative was near zero
        x: f64,
    },

    /// No valid bracket (function values at endpoints have same sign).
    #[error("No bracket: f({a}) and f({b}) have same sign")]
    NoBracket {
        /// Left bracket endpoint
        a: f64,
        /// Right bracket endpoint
        b: f64,
    },

    /// Invalid solver configuration.
    #[error("Invalid solver configuration: {0}")]
    InvalidConfig(String),

    /// Numerical instability during computation.
    #[error("Numerical instability: {0}")]
    NumericalInstability(String),
}
