//! Iterative root-finding solvers for numerical computation.
//!
//! This module provides the root-finding loops used for implied volatility
//! extraction.
//!
//! ## Available Solvers
//!
//! - [`RelaxationSolver`]: Fixed-step relaxation `x ← x + λ·(target − f(x))`,
//!   derivative-free, linear convergence at best
//! - [`NewtonRaphsonSolver`]: Quadratic convergence using an explicit derivative,
//!   with a bisection-safeguarded variant for a known bracket
//!
//! ## Configuration
//!
//! Both solvers use [`SolverConfig`] for configuring:
//! - `tolerance`: Convergence threshold on the absolute residual (default: 1e-6)
//! - `max_iterations`: Maximum iteration count (default: 1000)
//!
//! ## Outcomes
//!
//! A validated solve returns a [`SolverOutcome`], which distinguishes a
//! converged root from an exhausted iteration budget. The raw loop state is
//! available as an [`Iteration`] for callers that want the unclassified
//! last iterate.
//!
//! ## Examples
//!
//! ```
//! use pricer_core::math::solvers::{NewtonRaphsonSolver, SolverConfig};
//!
//! // Solve x² - 2 = 0 (find √2)
//! let solver = NewtonRaphsonSolver::new(SolverConfig::new(1e-12, 50));
//!
//! let f = |x: f64| x * x - 2.0;
//! let f_prime = |x: f64| 2.0 * x;
//!
//! let root = solver.find_root(f, f_prime, 1.0).unwrap();
//! assert!((root.value() - std::f64::consts::SQRT_2).abs() < 1e-10);
//! ```

mod config;
mod newton_raphson;
mod outcome;
mod relaxation;

// Re-export public types at module level
pub use config::SolverConfig;
pub use newton_raphson::NewtonRaphsonSolver;
pub use outcome::{Iteration, SolverOutcome};
pub use relaxation::RelaxationSolver;
