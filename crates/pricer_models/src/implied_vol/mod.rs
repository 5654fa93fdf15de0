//! Implied volatility extraction for European calls.
//!
//! Two entry points share the same iteration loop
//! ([`pricer_core::math::solvers::RelaxationSolver`]):
//!
//! - [`implied_volatility`] is permissive. It returns the last volatility
//!   estimate whether or not the tolerance was met, and lets NaN through
//! - [`ImpliedVolSolver`] validates the quote and settings and returns a
//!   [`SolverOutcome`](pricer_core::math::solvers::SolverOutcome) that tells
//!   `Converged` from `IterationLimitExceeded`
//!
//! ## Update rules
//!
//! [`UpdateMethod::FixedStep`] moves σ by `learning_rate · (market − model) / S`
//! each iteration. The step ignores vega, so the convergence speed depends on
//! the learning rate and on the scale of S, and nothing guarantees it
//! converges at all. [`UpdateMethod::Newton`] divides the pricing error by
//! vega instead and converges quadratically near the root; it is opt-in.
//! Newton keeps σ inside an interval whose prices straddle the market price
//! and bisects that interval whenever a step would leave it, so a distant
//! starting guess costs a few extra iterations rather than a negative σ.

mod quote;
mod solver;

pub use quote::CallQuote;
pub use solver::{implied_volatility, ImpliedVolSolver, UpdateMethod, DEFAULT_LEARNING_RATE};
